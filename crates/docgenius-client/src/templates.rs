use crate::types::GenerationTemplate;

/// Built-in generation presets
pub const GENERATION_TEMPLATES: &[GenerationTemplate] = &[
    GenerationTemplate {
        id: "1",
        name: "Summarize",
        description: "Create a concise summary of the document",
        prompt: "Please summarize the following content in a clear and concise manner:",
        icon: "FileText",
    },
    GenerationTemplate {
        id: "2",
        name: "Rewrite",
        description: "Rewrite content in a different style",
        prompt: "Please rewrite the following content to improve clarity and flow:",
        icon: "RefreshCw",
    },
    GenerationTemplate {
        id: "3",
        name: "Explain Simply",
        description: "Explain like I'm 5 years old",
        prompt: "Please explain the following content in simple terms that anyone can understand:",
        icon: "Lightbulb",
    },
    GenerationTemplate {
        id: "4",
        name: "Generate Notes",
        description: "Create structured study notes",
        prompt: "Please create structured study notes from the following content:",
        icon: "BookOpen",
    },
];

/// Look up a template by exact name or id
pub fn find_template(selector: &str) -> Option<&'static GenerationTemplate> {
    GENERATION_TEMPLATES
        .iter()
        .find(|t| t.name == selector || t.id == selector)
}

/// Full prompt sent to the generator: `prefix`, blank line, `input`.
/// Unknown or missing selectors leave the input untouched.
pub fn build_prompt(input: &str, selector: Option<&str>) -> String {
    match selector.and_then(find_template) {
        Some(template) => format!("{}\n\n{}", template.prompt, input),
        None => input.to_string(),
    }
}
