use super::*;

/// Accepts the counts YouTube sends as strings (`"12345"`) as well as plain
/// numbers. Unparseable strings become `None`.
pub(crate) fn deserialize_optional_count<'de, D>(
  deserializer: D,
) -> Result<Option<u64>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(s.trim().parse().ok()),
    Some(Value::Number(n)) => Ok(n.as_u64()),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

pub(crate) fn format_count(count: Option<u64>) -> String {
  format_number(count.unwrap_or_default())
}

/// Formats a count the way YouTube's Japanese UI does: `1.2万` from ten
/// thousand up, comma grouped below that.
pub(crate) fn format_number(n: u64) -> String {
  if n >= 10_000 {
    return format!("{}.{}万", n / 10_000, (n % 10_000) / 1_000);
  }

  let digits = n.to_string();

  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }

    grouped.push(ch);
  }

  grouped
}

/// Parses an RFC 3339 timestamp and formats it relative to `now`, falling
/// back to the raw value.
pub(crate) fn format_published(raw: &str, now: DateTime<Utc>) -> String {
  DateTime::parse_from_rfc3339(raw).map_or_else(
    |_| raw.to_string(),
    |published| format_relative_time(published.with_timezone(&Utc), now),
  )
}

pub(crate) fn format_relative_time(
  published: DateTime<Utc>,
  now: DateTime<Utc>,
) -> String {
  const SECONDS_PER_DAY: u64 = 86_400;

  let days = (now - published)
    .num_seconds()
    .unsigned_abs()
    .div_ceil(SECONDS_PER_DAY);

  match days {
    0..=6 => format!("{days}日前"),
    7..=29 => format!("{}週間前", days / 7),
    30..=364 => format!("{}ヶ月前", days / 30),
    _ => format!("{}年前", days / 365),
  }
}

pub(crate) fn sanitize_comment(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
