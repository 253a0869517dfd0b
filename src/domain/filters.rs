//! Filter registry and built-in filters

use crate::domain::template::Template;
use crate::domain::value::{Filter, Value, Variables};
use crate::error::{Result, SiteError};
use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

pub const JOIN_LINES: &str = "join-lines";
pub const FRIENDLY_DATETIME: &str = "friendly-datetime";
pub const POSTIFY_EACH: &str = "postify-each";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FRIENDLY_FORMAT: &str = "%b %d, %Y %I:%M%p";

/// Regex for the exact timestamp shape: two-digit fields, four-digit year
fn timestamp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap())
}

/// Named filters available to templates
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, Filter>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the registry used for site builds.
    ///
    /// `postify-each` captures a snapshot of the registry taken before it
    /// was added: the post template can use every other built-in, but not
    /// `postify-each` itself nor any filter registered afterwards.
    pub fn builtin(post_template: Template) -> Self {
        let mut registry = FilterRegistry::new();
        registry.register(JOIN_LINES, join_lines);
        registry.register(FRIENDLY_DATETIME, friendly_datetime);

        let postify = postify_each(Arc::new(post_template), registry.clone());
        registry.register(POSTIFY_EACH, move |value| postify.call(value));
        registry
    }

    /// Add or replace the filter under `name`
    pub fn register<F>(&mut self, name: &str, func: F)
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.filters
            .insert(name.to_string(), Filter::new(name, func));
    }

    pub fn lookup(&self, name: &str) -> Result<&Filter> {
        self.filters
            .get(name)
            .ok_or_else(|| SiteError::UnknownFilter(name.to_string()))
    }

    /// Registered filter names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.filters.keys().map(String::as_str).collect()
    }

    /// Every filter as a variable mapping entry
    pub fn to_variables(&self) -> Variables {
        let mut vars = Variables::new();
        for (name, filter) in &self.filters {
            vars.insert(name.clone(), filter.clone());
        }
        vars
    }
}

impl Variables {
    /// Merge a registry's filters into this mapping, replacing same-named keys
    pub fn with_filters(mut self, registry: &FilterRegistry) -> Self {
        self.extend(&registry.to_variables());
        self
    }
}

/// Join a list of text values with newlines
pub fn join_lines(value: Value) -> Result<Value> {
    let lines = value
        .as_list()?
        .iter()
        .map(Value::as_text)
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::from(lines.join("\n")))
}

/// Render `YYYY-MM-DD HH:MM:SS` as e.g. `Mar 05, 2021 09:07AM`
pub fn friendly_datetime(value: Value) -> Result<Value> {
    let input = value.as_text()?;
    if !timestamp_regex().is_match(input) {
        return Err(SiteError::MalformedTimestamp(input.to_string()));
    }

    let datetime = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT)
        .map_err(|_| SiteError::MalformedTimestamp(input.to_string()))?;

    // chrono reads second 60 as a leap second
    if datetime.nanosecond() >= 1_000_000_000 {
        return Err(SiteError::MalformedTimestamp(input.to_string()));
    }

    Ok(Value::from(datetime.format(FRIENDLY_FORMAT).to_string()))
}

/// Build a filter that renders each record of a list through `template`.
///
/// Each record is merged with `registry` before rendering; the result is
/// the list of rendered strings in input order.
pub fn postify_each(template: Arc<Template>, registry: FilterRegistry) -> Filter {
    let filters = registry.to_variables();
    Filter::new(POSTIFY_EACH, move |value: Value| {
        let rendered = value
            .as_list()?
            .iter()
            .map(|item| {
                let mut vars = item.as_record()?.clone();
                vars.extend(&filters);
                template.apply(&vars).map(Value::from)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::from(rendered))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    fn post(datetime: &str, body: &str) -> Value {
        Value::from(Variables::new().with("datetime", datetime).with("text", body))
    }

    fn builtin() -> FilterRegistry {
        FilterRegistry::builtin(Template::from_builtin("post.html").unwrap())
    }

    #[test]
    fn test_join_lines() {
        let empty = join_lines(Value::from(vec![])).unwrap();
        assert_eq!(empty.as_text().unwrap(), "");

        let joined = join_lines(Value::from(vec![text("a"), text("b")])).unwrap();
        assert_eq!(joined.as_text().unwrap(), "a\nb");

        let single = join_lines(Value::from(vec![text("only")])).unwrap();
        assert_eq!(single.as_text().unwrap(), "only");
    }

    #[test]
    fn test_join_lines_rejects_non_lists() {
        assert!(join_lines(text("a")).is_err());
        assert!(join_lines(Value::from(vec![Value::from(vec![])])).is_err());
    }

    #[test]
    fn test_friendly_datetime() {
        let morning = friendly_datetime(text("2021-03-05 09:07:00")).unwrap();
        assert_eq!(morning.as_text().unwrap(), "Mar 05, 2021 09:07AM");

        let afternoon = friendly_datetime(text("2021-12-25 13:00:00")).unwrap();
        assert_eq!(afternoon.as_text().unwrap(), "Dec 25, 2021 01:00PM");

        let midnight = friendly_datetime(text("2020-01-01 00:00:00")).unwrap();
        assert_eq!(midnight.as_text().unwrap(), "Jan 01, 2020 12:00AM");

        let noon = friendly_datetime(text("2022-07-14 12:30:59")).unwrap();
        assert_eq!(noon.as_text().unwrap(), "Jul 14, 2022 12:30PM");
    }

    #[test]
    fn test_friendly_datetime_malformed() {
        let inputs = [
            "",
            "2021-03-05",
            "2021-03-05T09:07:00",
            "2021-3-5 9:07:00",
            "2021-03-05 09:07:00 ",
            "2021-13-05 09:07:00",
            "2021-02-30 09:07:00",
            "2021-03-05 24:00:00",
            "2021-03-05 09:07:60",
            "2021-03-05_09.07.00",
        ];
        for input in inputs {
            match friendly_datetime(text(input)) {
                Err(SiteError::MalformedTimestamp(s)) => assert_eq!(s, input),
                other => panic!("Expected MalformedTimestamp for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_friendly_datetime_rejects_non_text() {
        assert!(matches!(
            friendly_datetime(Value::from(vec![])),
            Err(SiteError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FilterRegistry::new();
        assert!(matches!(
            registry.lookup("shout"),
            Err(SiteError::UnknownFilter(name)) if name == "shout"
        ));

        registry.register("shout", |v: Value| Ok(Value::from(v.as_text()?.to_uppercase())));
        let shout = registry.lookup("shout").unwrap();
        assert_eq!(shout.name(), "shout");
        assert_eq!(shout.call(text("hey")).unwrap().as_text().unwrap(), "HEY");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = FilterRegistry::new();
        registry.register("f", |_| Ok(Value::from("first")));
        registry.register("f", |_| Ok(Value::from("second")));

        assert_eq!(registry.names(), vec!["f"]);
        let out = registry.lookup("f").unwrap().call(text("")).unwrap();
        assert_eq!(out.as_text().unwrap(), "second");
    }

    #[test]
    fn test_builtin_names() {
        let registry = builtin();
        assert_eq!(
            registry.names(),
            vec![FRIENDLY_DATETIME, JOIN_LINES, POSTIFY_EACH]
        );
    }

    #[test]
    fn test_with_filters_overrides_data() {
        let registry = builtin();
        let vars = Variables::new()
            .with("posts", Value::from(vec![]))
            .with(JOIN_LINES, "shadowed")
            .with_filters(&registry);

        assert_eq!(vars.len(), 4);
        assert!(vars.get(JOIN_LINES).unwrap().as_filter().is_ok());
        assert!(vars.get("posts").unwrap().as_list().is_ok());
    }

    #[test]
    fn test_postify_each_then_join_lines_single_post() {
        let registry = builtin();
        let posts = Value::from(vec![post("2020-01-01 00:00:00", "hello")]);

        let rendered = registry.lookup(POSTIFY_EACH).unwrap().call(posts).unwrap();
        assert_eq!(rendered.as_list().unwrap().len(), 1);

        let joined = registry.lookup(JOIN_LINES).unwrap().call(rendered).unwrap();
        assert_eq!(
            joined.as_text().unwrap(),
            "<section>\n\
             <p>hello</p>\n\
             <time datetime=\"2020-01-01 00:00:00\">Jan 01, 2020 12:00AM</time>\n\
             </section>\n"
        );
    }

    #[test]
    fn test_postify_each_preserves_order() {
        let post_template = Template::new("[{{ text }}]").unwrap();
        let filter = postify_each(Arc::new(post_template), FilterRegistry::new());
        let posts = Value::from(vec![
            post("2020-01-02 00:00:00", "b"),
            post("2020-01-01 00:00:00", "a"),
            post("2020-01-03 00:00:00", "c"),
        ]);

        let rendered = filter.call(posts).unwrap();
        let joined = join_lines(rendered).unwrap();
        assert_eq!(joined.as_text().unwrap(), "[b]\n[a]\n[c]");
    }

    #[test]
    fn test_postify_each_empty_list() {
        let registry = builtin();
        let rendered = registry
            .lookup(POSTIFY_EACH)
            .unwrap()
            .call(Value::from(vec![]))
            .unwrap();
        assert!(rendered.as_list().unwrap().is_empty());
    }

    #[test]
    fn test_postify_each_propagates_errors() {
        let registry = builtin();
        let postify = registry.lookup(POSTIFY_EACH).unwrap();

        let bad_time = Value::from(vec![post("yesterday", "x")]);
        assert!(matches!(
            postify.call(bad_time),
            Err(SiteError::MalformedTimestamp(_))
        ));

        let missing_text =
            Value::from(vec![Value::from(Variables::new().with("datetime", "2020-01-01 00:00:00"))]);
        assert!(matches!(
            postify.call(missing_text),
            Err(SiteError::MissingVariable(key)) if key == "text"
        ));

        assert!(matches!(
            postify.call(Value::from(vec![text("not a record")])),
            Err(SiteError::TypeMismatch { expected: "record", .. })
        ));
    }

    #[test]
    fn test_post_template_does_not_see_later_filters() {
        let post_template = Template::new("{{ text | shout }}").unwrap();
        let mut registry = FilterRegistry::builtin(post_template);
        registry.register("shout", |v: Value| Ok(Value::from(v.as_text()?.to_uppercase())));
        let posts = Value::from(vec![post("2020-01-01 00:00:00", "x")]);

        assert!(matches!(
            registry.lookup(POSTIFY_EACH).unwrap().call(posts),
            Err(SiteError::MissingFilter(name)) if name == "shout"
        ));
    }

    #[test]
    fn test_post_template_cannot_recurse_into_postify_each() {
        let post_template = Template::new("{{ text | postify-each }}").unwrap();
        let registry = FilterRegistry::builtin(post_template);
        let posts = Value::from(vec![post("2020-01-01 00:00:00", "x")]);

        assert!(matches!(
            registry.lookup(POSTIFY_EACH).unwrap().call(posts),
            Err(SiteError::MissingFilter(name)) if name == POSTIFY_EACH
        ));
    }
}
