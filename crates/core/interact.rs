use dialoguer::Input;
use eyre::{eyre, Context, Result};

pub fn user_input(prompt: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))
}

/// Prompt for a value that may be left empty, an empty answer is `None`.
pub fn user_input_optional(prompt: &str) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .wrap_err_with(|| eyre!("User input cancelled"))?;

    Ok(Some(input).filter(|s| !s.is_empty()))
}
