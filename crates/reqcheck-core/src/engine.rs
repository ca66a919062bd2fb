//! Adapter over the `adblock` blocking engine.
//!
//! Rule text is accumulated into a filter set, the filter set is compiled into
//! an engine once at startup, and every request afterwards goes through
//! [`RequestChecker::check`].

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use adblock::lists::{FilterSet, ParseOptions};
use adblock::request::Request;
use adblock::Engine;
use log::debug;

use crate::error::{ConfigError, EngineError};
use crate::types::CheckDetail;

/// Rule lists compiled into the binary, used when no rule files are given.
pub const BUILTIN_RULE_LISTS: [(&str, &str); 2] = [
    ("builtin-ads", include_str!("../data/builtin-ads.txt")),
    ("builtin-privacy", include_str!("../data/builtin-privacy.txt")),
];

/// Decides whether a single request matches the loaded rules.
///
/// `request_type` is expected in the engine vocabulary; callers normalize
/// vendor labels first.
pub trait RequestChecker {
    fn check(&self, url: &str, context: &str, request_type: &str)
        -> Result<CheckDetail, EngineError>;
}

impl<T: RequestChecker + ?Sized> RequestChecker for &T {
    fn check(
        &self,
        url: &str,
        context: &str,
        request_type: &str,
    ) -> Result<CheckDetail, EngineError> {
        (**self).check(url, context, request_type)
    }
}

/// Accumulate rule text from every source, in order, into one filter set.
///
/// `debug` keeps the raw rule text so verbose results can name the filter.
pub fn build_filter_set<S: AsRef<str>>(sources: &[S], debug: bool) -> FilterSet {
    let mut filter_set = FilterSet::new(debug);
    for source in sources {
        filter_set.add_filter_list(source.as_ref(), ParseOptions::default());
    }
    filter_set
}

/// Read rule files into memory, failing on the first unreadable one.
pub fn read_rule_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>, ConfigError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadRules {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("read {} rule lines from '{}'", text.lines().count(), path.display());
            Ok(text)
        })
        .collect()
}

/// Rule text from `paths`, or the built-in lists when `paths` is empty.
pub fn load_rule_sources<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<Cow<'static, str>>, ConfigError> {
    if paths.is_empty() {
        return Ok(BUILTIN_RULE_LISTS
            .iter()
            .map(|(name, text)| {
                debug!("using built-in rule list '{}'", name);
                Cow::Borrowed(*text)
            })
            .collect());
    }
    Ok(read_rule_files(paths)?.into_iter().map(Cow::Owned).collect())
}

pub struct AdblockEngine {
    engine: Engine,
}

impl AdblockEngine {
    /// Compile a filter set into an engine.
    ///
    /// Optimisation merges rules and loses their provenance, so it is skipped
    /// in debug mode.
    pub fn from_filter_set(filter_set: FilterSet, debug: bool) -> Self {
        Self {
            engine: Engine::from_filter_set(filter_set, !debug),
        }
    }

    pub fn from_rule_sources<S: AsRef<str>>(sources: &[S], debug: bool) -> Self {
        Self::from_filter_set(build_filter_set(sources, debug), debug)
    }

    /// Build from rule files; an empty `paths` selects the built-in lists.
    pub fn from_rule_files<P: AsRef<Path>>(paths: &[P], debug: bool) -> Result<Self, ConfigError> {
        let sources = load_rule_sources(paths)?;
        debug!("building engine from {} rule list(s), debug={}", sources.len(), debug);
        Ok(Self::from_rule_sources(&sources, debug))
    }
}

impl RequestChecker for AdblockEngine {
    fn check(
        &self,
        url: &str,
        context: &str,
        request_type: &str,
    ) -> Result<CheckDetail, EngineError> {
        let request = Request::new(url, context, request_type)
            .map_err(|e| EngineError::InvalidRequest(format!("{:?}", e)))?;
        let result = self.engine.check_network_request(&request);

        Ok(CheckDetail {
            matched: result.matched,
            important: result.important,
            redirect: result.redirect,
            rewritten_url: result.rewritten_url,
            exception: result.exception,
            filter: result.filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = "||ads.example.com^\n@@||ads.example.com/allowed/\n||tracker.test^$script";

    #[test]
    fn blocks_matching_requests() {
        let engine = AdblockEngine::from_rule_sources(&[RULES], false);

        let detail = engine
            .check("https://ads.example.com/banner.png", "https://news.test/", "image")
            .expect("request should evaluate");
        assert!(detail.matched);

        let detail = engine
            .check("https://cdn.news.test/app.js", "https://news.test/", "script")
            .expect("request should evaluate");
        assert!(!detail.matched);
    }

    #[test]
    fn exceptions_override_blocks() {
        let engine = AdblockEngine::from_rule_sources(&[RULES], true);

        let detail = engine
            .check("https://ads.example.com/allowed/x.png", "https://news.test/", "image")
            .expect("request should evaluate");
        assert!(!detail.matched);
        assert!(detail.exception.is_some());
    }

    #[test]
    fn honours_type_options() {
        let engine = AdblockEngine::from_rule_sources(&[RULES], false);

        let script = engine
            .check("https://tracker.test/t.js", "https://news.test/", "script")
            .expect("request should evaluate");
        assert!(script.matched);

        let image = engine
            .check("https://tracker.test/t.gif", "https://news.test/", "image")
            .expect("request should evaluate");
        assert!(!image.matched);
    }

    #[test]
    fn accumulates_sources_in_order() {
        let engine =
            AdblockEngine::from_rule_sources(&["||first.test^", "||second.test^"], true);

        for url in ["https://first.test/a.js", "https://second.test/a.js"] {
            let detail = engine
                .check(url, "https://news.test/", "script")
                .expect("request should evaluate");
            assert!(detail.matched, "{url}");
            assert!(detail.filter.is_some());
        }
    }

    #[test]
    fn rejects_malformed_urls() {
        let engine = AdblockEngine::from_rule_sources(&[RULES], false);
        let result = engine.check("not a url", "https://news.test/", "image");
        assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
    }

    #[test]
    fn reports_unreadable_rule_files() {
        let missing = ["/nonexistent/reqcheck/rules.txt"];
        let result = AdblockEngine::from_rule_files(&missing, false);
        assert!(matches!(result, Err(ConfigError::ReadRules { .. })));
    }

    #[test]
    fn falls_back_to_builtin_lists() {
        let sources = load_rule_sources::<&Path>(&[]).unwrap();
        assert_eq!(sources.len(), BUILTIN_RULE_LISTS.len());
        assert!(sources.iter().all(|text| text.contains("||")));

        let engine = AdblockEngine::from_rule_files::<&Path>(&[], true).unwrap();
        let ad = engine
            .check(
                "https://securepubads.doubleclick.net/tag/js/gpt.js",
                "https://news.test/",
                "script",
            )
            .unwrap();
        assert!(ad.matched);
        assert!(ad.filter.is_some());

        let tracker = engine
            .check("https://www.google-analytics.com/analytics.js", "https://news.test/", "script")
            .unwrap();
        assert!(tracker.matched);

        let first_party = engine
            .check("https://news.test/app.js", "https://news.test/", "script")
            .unwrap();
        assert!(!first_party.matched);
    }

    #[test]
    fn rule_files_replace_builtin_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "||ads.example.com^\n").unwrap();

        let engine = AdblockEngine::from_rule_files(&[&path], false).unwrap();
        let detail = engine
            .check("https://doubleclick.net/ad.js", "https://news.test/", "script")
            .unwrap();
        assert!(!detail.matched);
    }

    #[test]
    fn loads_rule_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "||ads.example.com^\n").unwrap();

        let engine = AdblockEngine::from_rule_files(&[&path], false).unwrap();
        let detail = engine
            .check("https://ads.example.com/a.js", "https://news.test/", "script")
            .unwrap();
        assert!(detail.matched);
    }
}
