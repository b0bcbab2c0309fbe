use crate::analysis::Analysis;

/// Pretty JSON for the normalized series of each analyzed file
pub fn format_json(analyses: &[Analysis]) -> String {
    serde_json::to_string_pretty(analyses).unwrap_or_else(|e| {
        log::error!("Failed to serialize analyses: {}", e);
        "[]".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Series;
    use crate::units::{BaseUnit, Prefix};
    use serde_json::{json, Value};

    #[test]
    fn test_export_shape() {
        let analyses = vec![Analysis {
            source: "a.lis".to_string(),
            target: BaseUnit::from(Prefix::Pico),
            series: vec![
                Series {
                    label: "static_power".to_string(),
                    values: vec![1.5, 2.5],
                    failed: 0,
                },
                Series {
                    label: "av_pow".to_string(),
                    values: vec![],
                    failed: 3,
                },
            ],
        }];

        let parsed: Value = serde_json::from_str(&format_json(&analyses)).unwrap();
        assert_eq!(
            parsed,
            json!([{
                "source": "a.lis",
                "target": "p",
                "series": [
                    { "label": "static_power", "values": [1.5, 2.5] },
                    { "label": "av_pow", "values": [], "failed": 3 }
                ]
            }])
        );
    }

    #[test]
    fn test_base_unit_target_is_empty_string() {
        let analyses = vec![Analysis {
            source: "b.lis".to_string(),
            target: BaseUnit::NONE,
            series: vec![],
        }];
        let parsed: Value = serde_json::from_str(&format_json(&analyses)).unwrap();
        assert_eq!(parsed[0]["target"], json!(""));
    }
}
