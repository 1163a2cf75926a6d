// ABOUTME: Static HTML for the chat panel.
// ABOUTME: One bundled script, a prompt box, preset buttons, and a response area.

use crate::config::PresetPrompt;

/// Render the panel document. `script_uri` must already be a panel-loadable URI.
pub fn render_panel_html(script_uri: &str, presets: &[PresetPrompt]) -> String {
    let buttons: String = presets
        .iter()
        .map(|preset| {
            format!(
                "\n          <button class=\"preset-btn bg-blue-800 rounded px-2 py-1 hover:bg-blue-900 text-sm text-gray-100\" data-prompt=\"{}\">{}</button>",
                escape_html(&preset.prompt),
                escape_html(&preset.label)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <script src="https://unpkg.com/showdown/dist/showdown.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
  </head>
  <body>
    <h1 class="mb-2">Type your question:</h1>
    <input class="h-10 w-full text-white bg-stone-700 p-4 text-sm" type="text" id="prompt-input" />
    <div class="flex gap-x-1 mt-2">{buttons}
    </div>
    <div id="response" class="pt-4 text-lg"></div>
    <script src="{script}"></script>
  </body>
</html>"#,
        script = escape_html(script_uri),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_script_uri() {
        let html = render_panel_html("vscode-resource:/ext/media/main.js", &[]);
        assert!(html.contains(r#"<script src="vscode-resource:/ext/media/main.js"></script>"#));
        assert!(html.contains(r#"id="prompt-input""#));
        assert!(html.contains(r#"id="response""#));
    }

    #[test]
    fn renders_one_button_per_preset() {
        let presets = vec![
            PresetPrompt::new("Explain code", "Explain this."),
            PresetPrompt::new("Fix bugs", "Fix this."),
        ];
        let html = render_panel_html("main.js", &presets);
        assert_eq!(html.matches("preset-btn").count(), 2);
        assert!(html.contains(r#"data-prompt="Explain this.">Explain code</button>"#));
        assert!(html.contains(">Fix bugs</button>"));
    }

    #[test]
    fn preset_text_is_escaped() {
        let presets = vec![PresetPrompt::new("<b>Bold</b>", r#"say "hi" & leave"#)];
        let html = render_panel_html("main.js", &presets);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
        assert!(html.contains("say &quot;hi&quot; &amp; leave"));
        assert!(!html.contains("<b>Bold</b>"));
    }
}
