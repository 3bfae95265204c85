use super::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse {
  attribute_scores: BTreeMap<String, AttributeScore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
  summary_score: SummaryScore,
}

#[derive(Debug, Deserialize)]
struct SummaryScore {
  value: f64,
}

impl AnalyzeResponse {
  pub(crate) fn into_scores(self) -> AttributeScores {
    self
      .attribute_scores
      .into_iter()
      .map(|(name, score)| (name, score.summary_score.value))
      .collect()
  }
}
