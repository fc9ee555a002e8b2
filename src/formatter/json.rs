use std::collections::BTreeMap;
use std::fmt::Display;

use serde::Serialize;

use crate::types::{self, Access, Verb};

pub struct Json {
    result: JsonFullResult,
}

#[derive(Serialize)]
struct JsonResourceResult {
    group: String,
    resource: String,
    verbs: BTreeMap<&'static str, Access>,
}

#[derive(Serialize)]
struct JsonFullResult {
    items: Vec<JsonResourceResult>,
}

impl JsonResourceResult {
    fn new(verbs: &[Verb], value: types::ResourceCheckResult) -> Self {
        let verbs = verbs
            .iter()
            .filter_map(|v| value.items.get(v).map(|access| (v.as_str(), *access)))
            .collect::<BTreeMap<&'static str, Access>>();
        Self {
            group: value.resource.group,
            resource: value.resource.resource,
            verbs,
        }
    }
}

impl Json {
    pub fn new(verbs: &[Verb], full_result: types::FullResult) -> Self {
        Self {
            result: JsonFullResult {
                items: full_result
                    .items
                    .into_iter()
                    .map(|i| JsonResourceResult::new(verbs, i))
                    .collect::<Vec<JsonResourceResult>>(),
            },
        }
    }
}

impl Display for Json {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let output = serde_json::to_string(&self.result).map_err(|_| std::fmt::Error)?;
        f.write_str(&output)
    }
}
