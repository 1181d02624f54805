//! Known synthesis models.

use super::types::Model;

pub const DEFAULT_MODEL_ID: &str = "eleven_turbo_v2_5";

const MODELS: [Model; 3] = [
    Model {
        model_id: "eleven_flash_v2_5",
        name: "Eleven Flash v2.5 - Lowest Latency",
    },
    Model {
        model_id: "eleven_turbo_v2_5",
        name: "Eleven Turbo v2.5 - Quality/Speed Balance",
    },
    Model {
        model_id: "eleven_multilingual_v2",
        name: "Eleven Multilingual v2 - Highest Quality",
    },
];

/// The fixed model catalog, fastest first. Not fetched from the service.
pub fn list_models() -> Vec<Model> {
    MODELS.to_vec()
}

pub fn find_model(model_id: &str) -> Option<Model> {
    MODELS.iter().copied().find(|m| m.model_id == model_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_fixed() {
        let ids: Vec<_> = list_models().iter().map(|m| m.model_id).collect();
        assert_eq!(
            ids,
            ["eleven_flash_v2_5", "eleven_turbo_v2_5", "eleven_multilingual_v2"]
        );
        assert_eq!(list_models(), list_models());
    }

    #[test]
    fn default_model_is_listed() {
        assert!(find_model(DEFAULT_MODEL_ID).is_some());
        assert!(find_model("eleven_monolingual_v1").is_none());
    }
}
