//! HTML markup for browser hosts.
//!
//! Class names follow the `token-editor-*` / `token-chip*` convention the
//! stylesheet expects. All text and attribute values are escaped.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::editor::TokenEditor;
use crate::toolbar::{CustomTokenForm, ToolbarModel, FORM_HINT};

use super::{ChipView, SurfaceNode, SurfaceView};

/// Full editor: toolbar followed by the surface
pub fn render_editor(editor: &TokenEditor) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="token-editor" id="{}">"#,
        encode_double_quoted_attribute(editor.mount_id())
    );
    out.push_str(&render_toolbar(&editor.toolbar(), editor.form()));
    out.push_str(&render_surface(&SurfaceView::from_editor(editor)));
    out.push_str("</div>");
    out
}

pub fn render_surface(view: &SurfaceView) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="token-editor-surface" contenteditable="true" role="textbox" aria-multiline="true" data-empty="{}""#,
        view.empty
    );
    if !view.placeholder.is_empty() {
        let _ = write!(
            out,
            r#" data-placeholder="{}""#,
            encode_double_quoted_attribute(&view.placeholder)
        );
    }
    out.push('>');

    for node in &view.nodes {
        match node {
            SurfaceNode::Text(text) => out.push_str(&encode_text(text)),
            SurfaceNode::Chip(chip) => render_chip(&mut out, chip),
        }
    }

    out.push_str("</div>");
    out
}

fn render_chip(out: &mut String, chip: &ChipView) {
    let name = encode_double_quoted_attribute(chip.name.as_str());
    let _ = write!(
        out,
        concat!(
            r#"<span class="token-chip" data-token-name="{name}" data-chip="{ordinal}" contenteditable="false" title="{title}">"#,
            r#"<span class="token-chip-name">{label}</span>"#,
            r#"<span class="token-chip-code">{code}</span>"#,
            r#"<button type="button" class="token-chip-remove" aria-label="{remove}">&times;</button>"#,
            "</span>"
        ),
        name = name,
        ordinal = chip.ordinal,
        title = encode_double_quoted_attribute(&chip.title),
        label = encode_text(&chip.label),
        code = encode_text(&chip.name.placeholder()),
        remove = encode_double_quoted_attribute(&chip.remove_label()),
    );
}

pub fn render_toolbar(model: &ToolbarModel, form: &CustomTokenForm) -> String {
    let mut out = String::from(r#"<div class="token-editor-toolbar">"#);

    for group in &model.groups {
        let class = if group.custom {
            "token-editor-group token-editor-group-custom"
        } else {
            "token-editor-group"
        };
        let _ = write!(out, r#"<div class="{}">"#, class);
        if !group.label.is_empty() {
            let _ = write!(
                out,
                r#"<span class="token-editor-group-label">{}</span>"#,
                encode_text(&group.label)
            );
        }
        for button in &group.buttons {
            let _ = write!(
                out,
                r#"<button type="button" data-token-name="{}" title="{}">{}</button>"#,
                encode_double_quoted_attribute(button.name.as_str()),
                encode_double_quoted_attribute(&button.title),
                encode_text(&button.label)
            );
        }
        out.push_str("</div>");
    }

    render_form(&mut out, form);
    out.push_str("</div>");
    out
}

fn render_form(out: &mut String, form: &CustomTokenForm) {
    let (message, tone) = form
        .feedback
        .as_ref()
        .map(|f| (f.message.as_str(), f.tone.as_str()))
        .unwrap_or(("", "muted"));

    let _ = write!(
        out,
        concat!(
            r#"<div class="token-editor-actions">"#,
            r#"<p class="token-editor-actions-hint">{hint}</p>"#,
            r#"<form class="token-editor-add-form">"#,
            r#"<input type="text" name="token-name" placeholder="Token name (letters, digits, underscores)" value="{name}">"#,
            r#"<input type="text" name="token-label" placeholder="Display label (optional)" value="{label}">"#,
            r#"<button type="submit">Add token</button>"#,
            "</form>",
            r#"<p class="token-editor-actions-feedback" data-tone="{tone}">{message}</p>"#,
            "</div>"
        ),
        hint = encode_text(FORM_HINT),
        name = encode_double_quoted_attribute(&form.name_input),
        label = encode_double_quoted_attribute(&form.label_input),
        tone = tone,
        message = encode_text(message),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorOptions;
    use crate::registry::TokenRegistry;

    #[test]
    fn test_surface_escapes_text() {
        let registry = TokenRegistry::default();
        let editor = TokenEditor::mount(
            EditorOptions::new("m").with_backing("<b>{{x}}</b> {name}"),
            &registry,
        )
        .unwrap();
        let html = render_surface(&SurfaceView::from_editor(&editor));

        assert!(html.contains("&lt;b&gt;{x}&lt;/b&gt; "));
        assert!(html.contains(r#"data-token-name="name""#));
        assert!(html.contains(r#"<span class="token-chip-code">{name}</span>"#));
        assert!(html.contains(r#"aria-label="Remove {name}""#));
        assert!(html.contains(r#"data-empty="false""#));
    }

    #[test]
    fn test_empty_surface_has_placeholder() {
        let registry = TokenRegistry::default();
        let editor = TokenEditor::mount(
            EditorOptions::new("m").with_placeholder(r#"Say "hi""#),
            &registry,
        )
        .unwrap();
        let html = render_surface(&SurfaceView::from_editor(&editor));
        assert!(html.contains(r#"data-empty="true""#));
        assert!(html.contains(r#"data-placeholder="Say &quot;hi&quot;""#));
    }
}
