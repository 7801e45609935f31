//! Prompts for the generative fallback tier

use crate::model::Location;

/// Build the prompt asking for a safety snapshot of `location`
pub fn build_snapshot_prompt(location: &Location) -> String {
    format!(
        r#"Generate a realistic safety assessment for women using public transportation in {name}, India (around latitude {lat:.4}, longitude {lon:.4}, within {radius} km).

Return a single valid JSON object with exactly this structure:

{{
  "overallScore": number between 0 and 1,
  "areas": [
    {{
      "id": string (unique, lowercase with underscores),
      "name": string,
      "score": number between 0 and 1,
      "insights": string (one or two sentences)
    }}
  ],
  "narrative": string (a short summary paragraph),
  "capturedAt": ISO-8601 timestamp
}}

Include between 4 and 6 areas of {name}. Higher scores mean safer. Base the insights on factors such as lighting, CCTV coverage, crowding, police presence and reporting channels."#,
        name = location.name,
        lat = location.latitude,
        lon = location.longitude,
        radius = location.radius_km,
    )
}

/// Build the prompt asking for a systems map
pub fn build_systems_prompt(location: &Location) -> String {
    format!(
        r#"Generate realistic systems thinking data for women's safety in public transportation in {name}, India.

Return a single valid JSON object with exactly this structure:

{{
  "elements": [
    {{
      "id": string,
      "name": string,
      "description": string,
      "connections": [array of element ids],
      "category": one of ["social", "physical", "institutional", "economic"]
    }}
  ],
  "relationships": [
    {{
      "from": string (element id),
      "to": string (element id),
      "description": string,
      "strength": number between 0 and 1
    }}
  ],
  "leveragePoints": [
    {{
      "id": string,
      "name": string,
      "description": string,
      "impact": number between 0 and 1
    }}
  ]
}}

Include 8 system elements across the categories, 6 key relationships and 4 leverage points for intervention. Every id referenced in "connections", "from" and "to" must be one of the element ids."#,
        name = location.name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_prompt_embeds_location_and_shape() {
        let prompt = build_snapshot_prompt(&Location::delhi());
        assert!(prompt.contains("Delhi"));
        assert!(prompt.contains("28.6139"));
        assert!(prompt.contains("\"overallScore\""));
        assert!(prompt.contains("\"insights\""));
        assert!(prompt.contains("\"capturedAt\""));
        assert!(prompt.contains("between 4 and 6 areas"));
    }

    #[test]
    fn test_systems_prompt_names_categories() {
        let prompt = build_systems_prompt(&Location::new("Mumbai", 19.07, 72.87, 5.0));
        assert!(prompt.contains("Mumbai"));
        assert!(prompt.contains("\"leveragePoints\""));
        assert!(prompt.contains("institutional"));
    }
}
