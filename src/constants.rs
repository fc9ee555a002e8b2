use crate::types::Verb;

pub const ALL_VERBS: [Verb; 8] = [
    Verb::Get,
    Verb::List,
    Verb::Watch,
    Verb::Create,
    Verb::Update,
    Verb::Patch,
    Verb::Delete,
    Verb::DeleteCollection,
];

pub const DEFAULT_VERBS: [&str; 4] = ["list", "create", "update", "delete"];

pub const ICON_TABLE: &str = "icon-table";
pub const ASCII_TABLE: &str = "ascii-table";
pub const JSON: &str = "json";

pub const OUTPUT_FORMATS: [&str; 3] = [ICON_TABLE, ASCII_TABLE, JSON];

pub const CLUSTER_SCOPE_WARNING: &str =
    "No namespace given, this implies cluster scope (try -n if this is not intended)";
