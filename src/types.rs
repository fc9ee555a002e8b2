use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::Serialize;

use crate::constants;
use crate::error::ValidationError;

/// An API resource type, identified by its group and plural name.
///
/// The core group is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupResource {
    pub group: String,
    pub resource: String,
}

impl GroupResource {
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }
}

impl Display for GroupResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            f.write_str(&self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// One (group, version, resource) triple as exposed by the cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl CatalogEntry {
    pub fn group_resource(&self) -> GroupResource {
        GroupResource::new(self.group.clone(), self.resource.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    List,
    Watch,
    Create,
    Update,
    Patch,
    Delete,
    DeleteCollection,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Watch => "watch",
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Patch => "patch",
            Verb::Delete => "delete",
            Verb::DeleteCollection => "deletecollection",
        }
    }

    fn valid_list() -> String {
        constants::ALL_VERBS
            .iter()
            .map(Verb::as_str)
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        constants::ALL_VERBS
            .iter()
            .find(|v| v.as_str() == wanted)
            .copied()
            .ok_or_else(|| ValidationError::InvalidVerb {
                verb: s.to_string(),
                valid: Verb::valid_list(),
            })
    }
}

/// Validates the requested verbs, dropping repeated ones.
pub fn parse_verbs<S: AsRef<str>>(verbs: &[S]) -> Result<Vec<Verb>, ValidationError> {
    let mut parsed: Vec<Verb> = Vec::with_capacity(verbs.len());
    for verb in verbs {
        let verb = verb.as_ref().parse::<Verb>()?;
        if !parsed.contains(&verb) {
            parsed.push(verb);
        }
    }
    if parsed.is_empty() {
        return Err(ValidationError::NoVerbs {
            valid: Verb::valid_list(),
        });
    }
    Ok(parsed)
}

/// Outcome of a single access review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Allowed,
    Denied,
    /// The review could not be performed or its answer was unusable.
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    IconTable,
    AsciiTable,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            constants::ICON_TABLE => Ok(OutputFormat::IconTable),
            constants::ASCII_TABLE => Ok(OutputFormat::AsciiTable),
            constants::JSON => Ok(OutputFormat::Json),
            _ => Err(ValidationError::InvalidOutputFormat {
                format: s.to_string(),
                valid: constants::OUTPUT_FORMATS.join(", "),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResourceCheckResult {
    pub resource: GroupResource,
    pub items: HashMap<Verb, Access>,
}

#[derive(Clone, Debug, Default)]
pub struct FullResult {
    pub items: Vec<ResourceCheckResult>,
}

impl FullResult {
    /// Number of (resource, verb) cells.
    pub fn cell_count(&self) -> usize {
        self.items.iter().map(|r| r.items.len()).sum()
    }
}
