use super::candidate::{SoftwareMatch, WaterModelMatch};
use super::mention::{MentionKind, ProteinMention};
use serde::{Deserialize, Serialize};

/// One output row: a protein identifier with the software and water model associated to it.
///
/// `water_model_type` always takes part in equality (and therefore in de-duplication), but the
/// public projection drops it unless the caller asks for it, see [`ProteinRecord::project`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProteinRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MentionKind,
    pub software_name: Option<String>,
    pub software_version: Option<String>,
    pub water_model: Option<String>,
    pub water_model_type: Option<String>,
}

impl ProteinRecord {
    /// A record carrying only the identifier of `mention`; every association is `None`.
    pub fn from_mention(mention: &ProteinMention) -> Self {
        Self {
            id: mention.id.clone(),
            kind: mention.kind,
            software_name: None,
            software_version: None,
            water_model: None,
            water_model_type: None,
        }
    }

    pub fn with_software(mut self, software: &SoftwareMatch) -> Self {
        self.software_name = Some(software.name.clone());
        self.software_version = software.version.clone();
        self
    }

    pub fn with_water(mut self, water: &WaterModelMatch) -> Self {
        self.water_model = water.model.clone();
        self.water_model_type = Some(water.category.as_str().to_string());
        self
    }

    pub fn project(&self, include_water_model_type: bool) -> PublicRecord<'_> {
        PublicRecord {
            id: &self.id,
            kind: self.kind,
            software_name: self.software_name.as_deref(),
            software_version: self.software_version.as_deref(),
            water_model: self.water_model.as_deref(),
            water_model_type: if include_water_model_type {
                Some(self.water_model_type.as_deref())
            } else {
                None
            },
        }
    }
}

/// Borrowed view of a [`ProteinRecord`] in the shape handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicRecord<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub kind: MentionKind,
    pub software_name: Option<&'a str>,
    pub software_version: Option<&'a str>,
    pub water_model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_model_type: Option<Option<&'a str>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::candidate::WaterModelCategory;
    use serde_json::json;

    fn tip3p_record() -> ProteinRecord {
        ProteinRecord::from_mention(&ProteinMention::experimental("1QLX", 0))
            .with_software(&SoftwareMatch {
                name: "GROMACS".to_string(),
                version: Some("2018".to_string()),
            })
            .with_water(&WaterModelMatch {
                category: WaterModelCategory::Explicit,
                model: Some("TIP3P".to_string()),
            })
    }

    #[test]
    fn from_mention_leaves_every_association_empty() {
        let record = ProteinRecord::from_mention(&ProteinMention::simulated("AlphaFold", 3));
        assert_eq!(record.id, "AlphaFold");
        assert_eq!(record.kind, MentionKind::Simulated);
        assert!(record.software_name.is_none());
        assert!(record.software_version.is_none());
        assert!(record.water_model.is_none());
        assert!(record.water_model_type.is_none());
    }

    #[test]
    fn records_differing_only_in_water_model_type_are_distinct() {
        let explicit = tip3p_record();
        let mut implicit = explicit.clone();
        implicit.water_model_type = Some("implicit".to_string());
        assert_ne!(explicit, implicit);
    }

    #[test]
    fn public_projection_drops_water_model_type_by_default() {
        let record = tip3p_record();
        let value = serde_json::to_value(record.project(false)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1QLX",
                "type": "experimental",
                "software_name": "GROMACS",
                "software_version": "2018",
                "water_model": "TIP3P",
            })
        );
    }

    #[test]
    fn public_projection_keeps_water_model_type_on_request() {
        let record = ProteinRecord::from_mention(&ProteinMention::simulated("AlphaFold", 0));
        let value = serde_json::to_value(record.project(true)).unwrap();
        assert_eq!(value["water_model_type"], serde_json::Value::Null);
        assert!(value.as_object().unwrap().contains_key("water_model_type"));
    }
}
