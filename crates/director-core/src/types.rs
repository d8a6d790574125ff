//! Core Director domain types.
//!
//! This module provides the closed taxonomy of Director object types together
//! with a per-type metadata table, and the operation modes that drive endpoint
//! and selector derivation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between the host and service parts of a service name.
pub const COMPOSITE_NAME_SEPARATOR: char = '!';

/// Supported Director object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// Check, event or notification command
    Command,
    /// Command template
    CommandTemplate,
    /// Icinga endpoint
    Endpoint,
    /// Host object
    Host,
    /// Host group
    HostGroup,
    /// Host template
    HostTemplate,
    /// Notification apply rule
    Notification,
    /// Notification template
    NotificationTemplate,
    /// Service attached to a single host
    Service,
    /// Service apply rule, addressed by numeric id
    ServiceApplyRule,
    /// Service group
    ServiceGroup,
    /// Service template
    ServiceTemplate,
    /// Time period
    Timeperiod,
    /// Time period template
    TimeperiodTemplate,
    /// User
    User,
    /// User group
    UserGroup,
    /// User template
    UserTemplate,
    /// Icinga zone
    Zone,
}

/// Whether an object type denotes concrete objects or templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectVariant {
    /// Concrete object
    Object,
    /// Reusable template
    Template,
}

impl ObjectVariant {
    /// Value of the `object_type` discriminator field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Template => "template",
        }
    }
}

/// Which listing endpoint below the collection root holds a type's objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    /// The collection root itself, e.g. `hosts`
    Collection,
    /// `<collection>/templates`
    Templates,
    /// `<collection>/applyrules`
    ApplyRules,
}

/// How an object of a type is addressed in get/modify/delete requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// `name=<name>`
    Name,
    /// `host=<host>&name=<service>`, from a `host!service` name
    HostAndName,
    /// `id=<id>`, resolved by listing the type and matching on name
    LookupId,
}

/// Static metadata describing how one object type maps onto the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectTypeInfo {
    /// Public type token
    pub token: &'static str,
    /// Plural collection root used for listings
    pub collection: &'static str,
    /// Root used for create/get/modify/delete
    pub single: &'static str,
    /// Listing endpoint below the collection root
    pub listing: Listing,
    /// Object or template
    pub variant: ObjectVariant,
    /// Selector strategy
    pub identity: Identity,
    /// Listing is shared with another variant and must be filtered on `object_type`
    pub shared_listing: bool,
}

impl ObjectTypeInfo {
    const fn new(
        token: &'static str,
        collection: &'static str,
        single: &'static str,
        listing: Listing,
        variant: ObjectVariant,
    ) -> Self {
        Self {
            token,
            collection,
            single,
            listing,
            variant,
            identity: Identity::Name,
            shared_listing: false,
        }
    }

    const fn identified_by(mut self, identity: Identity) -> Self {
        self.identity = identity;
        self
    }

    const fn sharing_listing(mut self) -> Self {
        self.shared_listing = true;
        self
    }
}

use self::Listing::{ApplyRules, Collection, Templates};
use self::ObjectVariant::{Object, Template};

const COMMAND: ObjectTypeInfo =
    ObjectTypeInfo::new("Command", "commands", "commands", Collection, Object).sharing_listing();
const COMMAND_TEMPLATE: ObjectTypeInfo = ObjectTypeInfo::new(
    "CommandTemplate",
    "commands",
    "commands",
    Collection,
    Template,
)
.sharing_listing();
const ENDPOINT: ObjectTypeInfo =
    ObjectTypeInfo::new("Endpoint", "endpoints", "endpoint", Collection, Object);
const HOST: ObjectTypeInfo = ObjectTypeInfo::new("Host", "hosts", "host", Collection, Object);
const HOST_GROUP: ObjectTypeInfo =
    ObjectTypeInfo::new("HostGroup", "hostgroups", "hostgroup", Collection, Object);
const HOST_TEMPLATE: ObjectTypeInfo =
    ObjectTypeInfo::new("HostTemplate", "hosts", "host", Templates, Template);
const NOTIFICATION: ObjectTypeInfo = ObjectTypeInfo::new(
    "Notification",
    "notifications",
    "notification",
    ApplyRules,
    Object,
);
const NOTIFICATION_TEMPLATE: ObjectTypeInfo = ObjectTypeInfo::new(
    "NotificationTemplate",
    "notifications",
    "notification",
    Templates,
    Template,
);
const SERVICE: ObjectTypeInfo =
    ObjectTypeInfo::new("Service", "services", "service", Collection, Object)
        .identified_by(Identity::HostAndName);
const SERVICE_APPLY_RULE: ObjectTypeInfo = ObjectTypeInfo::new(
    "ServiceApplyRule",
    "services",
    "service",
    ApplyRules,
    Object,
)
.identified_by(Identity::LookupId);
const SERVICE_GROUP: ObjectTypeInfo = ObjectTypeInfo::new(
    "ServiceGroup",
    "servicegroups",
    "servicegroup",
    Collection,
    Object,
);
const SERVICE_TEMPLATE: ObjectTypeInfo =
    ObjectTypeInfo::new("ServiceTemplate", "services", "service", Templates, Template);
const TIMEPERIOD: ObjectTypeInfo =
    ObjectTypeInfo::new("Timeperiod", "timeperiods", "timeperiod", Collection, Object);
const TIMEPERIOD_TEMPLATE: ObjectTypeInfo = ObjectTypeInfo::new(
    "TimeperiodTemplate",
    "timeperiods",
    "timeperiod",
    Templates,
    Template,
);
const USER: ObjectTypeInfo = ObjectTypeInfo::new("User", "users", "user", Collection, Object);
const USER_GROUP: ObjectTypeInfo =
    ObjectTypeInfo::new("UserGroup", "usergroups", "usergroup", Collection, Object);
const USER_TEMPLATE: ObjectTypeInfo =
    ObjectTypeInfo::new("UserTemplate", "users", "user", Templates, Template);
const ZONE: ObjectTypeInfo = ObjectTypeInfo::new("Zone", "zones", "zone", Collection, Object);

impl ObjectType {
    /// Returns the metadata row for this type.
    #[must_use]
    pub const fn info(&self) -> &'static ObjectTypeInfo {
        match self {
            Self::Command => &COMMAND,
            Self::CommandTemplate => &COMMAND_TEMPLATE,
            Self::Endpoint => &ENDPOINT,
            Self::Host => &HOST,
            Self::HostGroup => &HOST_GROUP,
            Self::HostTemplate => &HOST_TEMPLATE,
            Self::Notification => &NOTIFICATION,
            Self::NotificationTemplate => &NOTIFICATION_TEMPLATE,
            Self::Service => &SERVICE,
            Self::ServiceApplyRule => &SERVICE_APPLY_RULE,
            Self::ServiceGroup => &SERVICE_GROUP,
            Self::ServiceTemplate => &SERVICE_TEMPLATE,
            Self::Timeperiod => &TIMEPERIOD,
            Self::TimeperiodTemplate => &TIMEPERIOD_TEMPLATE,
            Self::User => &USER,
            Self::UserGroup => &USER_GROUP,
            Self::UserTemplate => &USER_TEMPLATE,
            Self::Zone => &ZONE,
        }
    }

    /// Returns the public type token, e.g. `HostTemplate`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.info().token
    }

    /// Returns all supported object types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Command,
            Self::CommandTemplate,
            Self::Endpoint,
            Self::Host,
            Self::HostGroup,
            Self::HostTemplate,
            Self::Notification,
            Self::NotificationTemplate,
            Self::Service,
            Self::ServiceApplyRule,
            Self::ServiceGroup,
            Self::ServiceTemplate,
            Self::Timeperiod,
            Self::TimeperiodTemplate,
            Self::User,
            Self::UserGroup,
            Self::UserTemplate,
            Self::Zone,
        ]
    }

    /// Returns true for template types.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.info().variant == ObjectVariant::Template
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|object_type| object_type.name() == s)
            .ok_or_else(|| Error::UnsupportedObjectType(s.to_string()))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Conversion into an [`ObjectType`], accepting both typed values and tokens.
pub trait IntoObjectType {
    /// Perform the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedObjectType`] for tokens outside the taxonomy.
    fn into_object_type(self) -> Result<ObjectType>;
}

impl IntoObjectType for ObjectType {
    fn into_object_type(self) -> Result<ObjectType> {
        Ok(self)
    }
}

impl IntoObjectType for &str {
    fn into_object_type(self) -> Result<ObjectType> {
        self.parse()
    }
}

impl IntoObjectType for &String {
    fn into_object_type(self) -> Result<ObjectType> {
        self.parse()
    }
}

/// Operation modes understood by the endpoint resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationMode {
    /// List objects of a type
    List,
    /// Fetch a single object
    Get,
    /// Create an object
    Create,
    /// Modify an object
    Modify,
    /// Delete an object
    Delete,
}

impl OperationMode {
    /// Returns the mode token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }

    /// Returns true if the mode addresses one existing object through a selector.
    #[must_use]
    pub const fn needs_selector(&self) -> bool {
        matches!(self, Self::Get | Self::Modify | Self::Delete)
    }
}

impl FromStr for OperationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(Self::List),
            "get" => Ok(Self::Get),
            "create" => Ok(Self::Create),
            "modify" => Ok(Self::Modify),
            "delete" => Ok(Self::Delete),
            _ => Err(Error::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
