//! Template engine for rendering the banner fragment.

use std::fmt::Write;

use minijinja::{
    context, escape_formatter, AutoEscape, Environment, Error, ErrorKind, Output, State, Value,
};

use crate::entries::{Announcement, RenderStyle};

/// Values shared by every banner template.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    /// Banner label
    pub label: &'a str,
    /// Today's date, already formatted
    pub today: &'a str,
    /// Entries to show
    pub announcement: &'a Announcement,
}

/// Template engine using minijinja.
///
/// Templates end in `.html`, so every value is HTML-escaped. Only the
/// characters that matter in text and quoted attributes are replaced;
/// `/` stays literal so URLs read as written.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in banner templates.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);

        env.add_template("item.html", ITEM_TEMPLATE)
            .expect("Failed to add item template");
        env.add_template("marquee.html", MARQUEE_TEMPLATE)
            .expect("Failed to add marquee template");
        env.add_template("list.html", LIST_TEMPLATE)
            .expect("Failed to add list template");
        env.add_template("empty.html", EMPTY_TEMPLATE)
            .expect("Failed to add empty template");

        Self { env }
    }

    /// Render the banner in the given style.
    pub fn render_banner(
        &self,
        style: RenderStyle,
        context: &Context<'_>,
    ) -> Result<String, minijinja::Error> {
        let items: Vec<_> = context.announcement.items().collect();

        self.env.get_template(style.template())?.render(context! {
            label => context.label,
            today => context.today,
            added => &context.announcement.added,
            modified => &context.announcement.modified,
            items => items,
        })
    }

    /// Render the "no updates" notice.
    pub fn render_empty(&self, label: &str, today: &str) -> Result<String, minijinja::Error> {
        self.env.get_template("empty.html")?.render(context! {
            label => label,
            today => today,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn html_formatter(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    if matches!(state.auto_escape(), AutoEscape::Html) && !value.is_safe() {
        if let Some(text) = value.as_str() {
            return write_escaped(out, text)
                .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write output"));
        }
    }
    escape_formatter(out, state, value)
}

fn write_escaped(out: &mut impl Write, text: &str) -> std::fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&#x27;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}

const ITEM_TEMPLATE: &str = r##"{% macro item(entry) -%}
<span class="bulletin__item bulletin__item--{{ entry.badge }}">{% if entry.badge == "new" %}✅{% else %}🔁{% endif %} <a href="{{ entry.url }}">{{ entry.title }}</a></span>
{%- endmacro %}"##;

const MARQUEE_TEMPLATE: &str = r##"{% from "item.html" import item -%}
<div class="md-banner bulletin" role="status" aria-label="{{ label }}">
  <div class="bulletin__inner">
    <span class="bulletin__label">{{ label }}</span>

    <div class="bulletin__marquee" aria-hidden="true">
    {%- for track in ["a", "b"] %}
      <div class="bulletin__track bulletin__track--{{ track }}">
        {% for entry in items %}{% if not loop.first %} <span class="bulletin__sep">•</span> {% endif %}{{ item(entry) }}{% endfor %}
      </div>
    {%- endfor %}
    </div>

    <div class="bulletin__static">
      📌 {{ label }} ({{ today }}) · {{ item(items[0]) }}
    </div>
  </div>
</div>
"##;

const LIST_TEMPLATE: &str = r##"<div class="md-banner bulletin bulletin--list" role="status" aria-label="{{ label }}">
  <p class="bulletin__label">{{ label }} <time class="bulletin__today">{{ today }}</time></p>
{%- for group, entries in [["new", added], ["updated", modified]] %}
  {%- if entries %}
  <ul class="bulletin__group bulletin__group--{{ group }}">
    {%- for entry in entries %}
    <li class="bulletin__item bulletin__item--{{ entry.badge }}">
      <span class="bulletin__badge">{% if entry.badge == "new" %}New{% else %}Updated{% endif %}</span>
      <a href="{{ entry.url }}">{{ entry.title }}</a>
      {%- if entry.date %} <time class="bulletin__date">{{ entry.date }}</time>{% endif %}
    </li>
    {%- endfor %}
  </ul>
  {%- endif %}
{%- endfor %}
</div>
"##;

const EMPTY_TEMPLATE: &str = r##"<div class="md-banner bulletin bulletin--empty" role="status" aria-label="{{ label }}">
  <span class="bulletin__label">{{ label }}</span> No recent updates ({{ today }})
</div>
"##;
