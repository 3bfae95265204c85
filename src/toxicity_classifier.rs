use super::*;

/// Raw per-attribute summary scores keyed by the service's attribute names.
pub(crate) type AttributeScores = BTreeMap<String, f64>;

/// A service that scores text for toxicity.
#[async_trait]
pub(crate) trait TextScorer: Send + Sync {
  async fn score_text(&self, text: &str) -> Result<AttributeScores>;
}

#[derive(Clone)]
pub(crate) struct ToxicityClassifier<S> {
  scorer: S,
}

impl<S: TextScorer> ToxicityClassifier<S> {
  /// Scores `text` once. Any failure yields a safe verdict carrying the
  /// error, so an unscored comment stays visible.
  pub(crate) async fn classify(
    &self,
    comment_id: &str,
    text: &str,
  ) -> ClassificationResult {
    match self.score(text).await {
      Ok(scores) => {
        let profile = ThresholdProfile::detect(text);

        let result = ClassificationResult::scored(comment_id, profile, scores);

        debug!(
          comment_id,
          ?profile,
          is_toxic = result.is_toxic,
          "classified comment"
        );

        result
      }
      Err(error) => {
        let error = format!("{error:#}");

        warn!(
          comment_id,
          error = %error,
          "classification failed, keeping comment visible"
        );

        ClassificationResult::default_safe(comment_id, error)
      }
    }
  }

  pub(crate) fn new(scorer: S) -> Self {
    Self { scorer }
  }

  async fn score(&self, text: &str) -> Result<BTreeMap<Attribute, f64>> {
    let raw = self.scorer.score_text(text).await?;

    let mut scores = BTreeMap::new();

    for (name, score) in raw {
      let Some(attribute) = Attribute::from_name(&name) else {
        continue;
      };

      ensure!(
        (0.0..=1.0).contains(&score),
        "score for {name} is out of range: {score}"
      );

      scores.insert(attribute, score);
    }

    Ok(scores)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::fakes::FakeScorer};

  #[tokio::test]
  async fn japanese_text_uses_lower_threshold() {
    let classifier = ToxicityClassifier::new(
      FakeScorer::default().with_default_scores(&[("TOXICITY", 0.15)]),
    );

    let japanese = classifier.classify("c1", "ひどい動画").await;
    let english = classifier.classify("c2", "awful video").await;

    assert!(japanese.is_toxic);
    assert!(!english.is_toxic);
    assert_eq!(japanese.scores, english.scores);
  }

  #[tokio::test]
  async fn transport_failure_fails_open() {
    let classifier =
      ToxicityClassifier::new(FakeScorer::default().failing_on("boom"));

    let result = classifier.classify("c1", "boom").await;

    assert!(!result.is_toxic);
    assert!(result.scores.is_empty());
    assert!(result.error.as_deref().is_some_and(|e| e.contains("boom")));
  }

  #[tokio::test]
  async fn out_of_range_score_is_treated_as_malformed() {
    let classifier = ToxicityClassifier::new(
      FakeScorer::default().with_default_scores(&[("INSULT", 1.7)]),
    );

    let result = classifier.classify("c1", "text").await;

    assert!(!result.is_toxic);
    assert!(result.is_degraded());
  }

  #[tokio::test]
  async fn unknown_attributes_are_ignored() {
    let classifier = ToxicityClassifier::new(
      FakeScorer::default()
        .with_default_scores(&[("PROFANITY", 0.99), ("THREAT", 0.2)]),
    );

    let result = classifier.classify("c1", "text").await;

    assert!(!result.is_toxic);
    assert_eq!(
      result.scores,
      [(Attribute::Threat, 0.2)].into_iter().collect()
    );
  }

  #[tokio::test]
  async fn each_classification_calls_the_scorer_exactly_once() {
    let scorer = FakeScorer::default().failing_on("flaky");

    let classifier = ToxicityClassifier::new(scorer.clone());

    classifier.classify("c1", "flaky").await;
    classifier.classify("c2", "").await;

    assert_eq!(scorer.calls(), vec!["flaky".to_string(), String::new()]);
  }
}
