use std::collections::BTreeSet;

use super::fuzzy::rules::normalize_tag;

/// Specialization reported for candidates without any recognized language.
pub const NEUTRAL_SPECIALIZATION: f64 = 0.5;

/// Languages that pull a candidate's specialization towards backend or frontend.
///
/// Scores land in three bands: pure backend in `0.2..=0.5`, mixed stacks in `0.6..=0.8`
/// (balance of frontend share), pure frontend in `0.7..=1.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    backend: BTreeSet<String>,
    frontend: BTreeSet<String>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(
            ["Python", "Java", "C++", "C#", "Go", "Rust"],
            ["JavaScript", "TypeScript", "HTML", "CSS"],
        )
    }
}

impl SkillCatalog {
    pub fn new<B, F, S, T>(backend: B, frontend: F) -> Self
    where
        B: IntoIterator<Item = S>,
        F: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            backend: backend
                .into_iter()
                .map(|skill| normalize_tag(skill.as_ref()))
                .collect(),
            frontend: frontend
                .into_iter()
                .map(|skill| normalize_tag(skill.as_ref()))
                .collect(),
        }
    }

    pub fn specialization(&self, skills: &[String]) -> f64 {
        let skills: BTreeSet<String> = skills.iter().map(|skill| normalize_tag(skill)).collect();
        let backend = skills.intersection(&self.backend).count();
        let frontend = skills.intersection(&self.frontend).count();

        match (backend, frontend) {
            (0, 0) => NEUTRAL_SPECIALIZATION,
            (b, f) if b > 0 && f > 0 => 0.6 + 0.2 * f as f64 / (b + f) as f64,
            (b, 0) => 0.2 + 0.3 * ratio(b, self.backend.len()),
            (_, f) => 0.7 + 0.3 * ratio(f, self.frontend.len()),
        }
    }
}

/// Recognized work arrangements and the tags that map onto them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkFormatCatalog {
    formats: Vec<(String, BTreeSet<String>)>,
}

impl Default for WorkFormatCatalog {
    fn default() -> Self {
        Self::new([
            ("remote", &["remote", "удалённый", "удаленный"][..]),
            ("office", &["office", "onsite", "on-site", "очно"][..]),
            ("hybrid", &["hybrid", "гибридный"][..]),
        ])
    }
}

impl WorkFormatCatalog {
    pub fn new<'a, I>(formats: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        Self {
            formats: formats
                .into_iter()
                .map(|(canonical, aliases)| {
                    let mut tags: BTreeSet<String> =
                        aliases.iter().map(|alias| normalize_tag(alias)).collect();
                    tags.insert(normalize_tag(canonical));
                    (normalize_tag(canonical), tags)
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Canonical arrangements named by `tags`; unknown tags are dropped.
    pub fn canonicalize(&self, tags: &[String]) -> BTreeSet<String> {
        tags.iter()
            .filter_map(|tag| {
                let tag = normalize_tag(tag);
                self.formats
                    .iter()
                    .find(|(_, aliases)| aliases.contains(&tag))
                    .map(|(canonical, _)| canonical.clone())
            })
            .collect()
    }

    /// Share of recognized arrangements the candidate supports.
    pub fn flexibility(&self, tags: &[String]) -> f64 {
        ratio(self.canonicalize(tags).len(), self.formats.len())
    }
}

/// Fraction of `required` skills present in `offered`, or `None` without requirements.
pub fn skill_overlap(offered: &[String], required: &[String]) -> Option<f64> {
    let required: BTreeSet<String> = required
        .iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect();
    if required.is_empty() {
        return None;
    }
    let offered: BTreeSet<String> = offered.iter().map(|tag| normalize_tag(tag)).collect();
    Some(ratio(required.intersection(&offered).count(), required.len()))
}

/// Fraction of required work formats the candidate offers, or `None` without requirements.
pub fn schedule_overlap(
    catalog: &WorkFormatCatalog,
    offered: &[String],
    required: &[String],
) -> Option<f64> {
    let required = catalog.canonicalize(required);
    if required.is_empty() {
        return None;
    }
    let offered = catalog.canonicalize(offered);
    Some(ratio(required.intersection(&offered).count(), required.len()))
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
