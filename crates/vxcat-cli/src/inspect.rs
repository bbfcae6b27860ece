use serde::Serialize;
use vxcat_catalog::{extract_spec, synthesize_tags};
use vxcat_core::SpecRecord;

#[derive(Debug, Serialize)]
struct Inspection<'a> {
    title: &'a str,
    spec: SpecRecord,
    tags: Vec<String>,
    /// Descriptive technology labels, e.g. `"SR (Short Range)"`.
    technology_labels: Vec<&'static str>,
}

fn inspect(title: &str) -> Inspection<'_> {
    let spec = extract_spec(title);
    let tags = synthesize_tags(&spec, &[]);
    let technology_labels = spec.technology.iter().map(|t| t.label()).collect();
    Inspection {
        title,
        spec,
        tags,
        technology_labels,
    }
}

pub(crate) fn run_inspect(title: &str) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&inspect(title))?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_serializes_spec_tags_and_labels() {
        let value = serde_json::to_value(inspect("SFP 10G LR 10km")).unwrap();
        assert_eq!(value["spec"]["form_factor"], "SFP+");
        assert_eq!(value["tags"][0], "Speed_10G");
        assert_eq!(value["technology_labels"][0], "LR (Long Range)");
    }
}
