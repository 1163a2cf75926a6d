// ABOUTME: Request composition: combines the user's prompt with editor context.
// ABOUTME: Selection wins over the whole document; no editor means the prompt alone.

use crate::host::EditorSnapshot;

/// Separator placed between the code context and the user's prompt.
pub const PROMPT_SEPARATOR: &str = "\n\n\t";

/// Builds the text sent to the chat client for one search.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    pub prompt: &'a str,
    pub editor: Option<&'a EditorSnapshot>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            editor: None,
        }
    }

    /// Attach the active editor's state, if there is one.
    pub fn editor(mut self, editor: Option<&'a EditorSnapshot>) -> Self {
        self.editor = editor;
        self
    }

    /// Compose the request text.
    ///
    /// A non-empty selection is sent as-is ahead of the prompt. Otherwise the
    /// full document is introduced with its language id.
    pub fn build(&self) -> String {
        let Some(editor) = self.editor else {
            return self.prompt.to_string();
        };

        match editor.selected_text.as_deref().filter(|s| !s.is_empty()) {
            Some(selected) => format!("{selected}{PROMPT_SEPARATOR}{}", self.prompt),
            None => format!(
                "This is the {} file I'm working on:\n\t{}{PROMPT_SEPARATOR}{}",
                editor.language_id, editor.text, self.prompt
            ),
        }
    }
}

/// Shorthand for `RequestBuilder::new(prompt).editor(editor).build()`.
pub fn compose_request(prompt: &str, editor: Option<&EditorSnapshot>) -> String {
    RequestBuilder::new(prompt).editor(editor).build()
}
