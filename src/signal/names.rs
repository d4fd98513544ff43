//! Display-name normalization: strip a vehicle prefix such as `IONIQ5_`.

use regex::Regex;

/// Matches names starting with a make/model token followed by a separator.
#[derive(Debug, Clone)]
pub struct NamePrefixMatcher {
    pattern: Option<Regex>,
}

impl NamePrefixMatcher {
    /// Builds the matcher for one vehicle.
    ///
    /// Candidates are `make`, `model`, `make_model`, `make-model` and
    /// `makemodel`, lower-cased, empty ones dropped. A candidate only matches
    /// at the start of a name and only when followed by `_`, whitespace, `-`
    /// or `.`.
    #[must_use]
    pub fn new(make: &str, model: &str) -> Self {
        let candidates: Vec<String> = [
            make.to_string(),
            model.to_string(),
            format!("{make}_{model}"),
            format!("{make}-{model}"),
            format!("{make}{model}"),
        ]
        .into_iter()
        .filter(|c| !c.is_empty())
        .map(|c| regex::escape(&c.to_lowercase()))
        .collect();

        if candidates.is_empty() {
            return Self { pattern: None };
        }

        let source = format!(r"(?i)^({})[_\s\-.]", candidates.join("|"));
        let pattern = match Regex::new(&source) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(%err, make, model, "name prefix pattern rejected");
                None
            }
        };
        Self { pattern }
    }

    /// Removes the matched prefix and its separator; the rest is untouched.
    #[must_use]
    pub fn strip(&self, name: &str) -> String {
        match self.pattern.as_ref().and_then(|re| re.find(name)) {
            Some(m) => name[m.end()..].to_string(),
            None => name.to_string(),
        }
    }
}

/// Strips a vehicle-specific prefix from `name`.
#[must_use]
pub fn normalize_name(name: &str, make: &str, model: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    NamePrefixMatcher::new(make, model).strip(name)
}
