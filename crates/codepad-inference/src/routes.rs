use crate::client::SamplingParams;

/// The fixed prompt routes, each with its own template and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRoute {
    Generate,
    Explain,
    Fix,
}

impl CompletionRoute {
    pub fn sampling(self) -> SamplingParams {
        let (max_tokens, temperature) = match self {
            Self::Generate => (1024, 0.7),
            Self::Explain => (512, 0.3),
            Self::Fix => (1024, 0.3),
        };
        SamplingParams {
            max_tokens,
            temperature,
            top_p: 0.7,
            top_k: 50,
            repetition_penalty: 1.1,
        }
    }
}

pub fn generate_prompt(prompt: &str) -> String {
    format!("Generate code for the following request: {prompt}\n\nCode:")
}

pub fn explain_prompt(code: &str) -> String {
    format!("Explain this code in detail:\n\n{code}\n\nExplanation:")
}

pub fn fix_prompt(code: &str, issue: &str) -> String {
    format!("Fix the following code issue: {issue}\n\nOriginal code:\n{code}\n\nFixed code:")
}
