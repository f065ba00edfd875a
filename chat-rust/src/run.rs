use crate::{openai::OpenAIChatModel, ChatConfig, ChatResult};
use std::io::Write;

/// Build the client, send the configured conversation, and write the reply
/// followed by a newline to `out`. Nothing is kept between calls.
pub async fn run<W: Write>(config: &ChatConfig, out: &mut W) -> ChatResult<()> {
    let model = OpenAIChatModel::from_config(config)?;
    let text = model.generate_reply(config.messages()).await?;

    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}
