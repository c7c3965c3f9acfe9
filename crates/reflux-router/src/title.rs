//! Title composition across pattern matches
//!
//! Each matching pattern route may carry a title template. Templates are folded
//! left to right in registration order; a template can pull in everything
//! accumulated so far through the [`TITLE_PLACEHOLDER`] token.
//!
//! ```
//! use reflux_router::title::compose_title;
//!
//! let title = compose_title([Some("one"), Some("{title} > two"), None, Some("{title} > three")]);
//! assert_eq!(title, "one > two > three");
//! ```

/// Token replaced by the title accumulated from earlier matches
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Applies one template to the accumulated title
///
/// Only the first placeholder is substituted; later occurrences stay literal.
pub fn apply_template(template: &str, accumulated: &str) -> String {
    template.replacen(TITLE_PLACEHOLDER, accumulated, 1)
}

/// Folds title templates into a single title
///
/// Missing and empty templates leave the accumulator unchanged. The result is
/// an empty string when no template applied.
pub fn compose_title<'a, I>(templates: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    templates
        .into_iter()
        .flatten()
        .filter(|template| !template.is_empty())
        .fold(String::new(), |accumulated, template| {
            apply_template(template, &accumulated)
        })
}
