//! Message text to command parsing.

/// A chat command recognized by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `hello`
    Hello,

    /// `image` or `image <name>`
    ShowImage { name: Option<String> },

    /// `imageList`
    ListImages,

    /// `updateImage <name> <url>`
    SaveImage { name: String, url: String },

    /// `updateImage` with the wrong number of arguments.
    InvalidSaveImage,

    /// Anything else. The bot stays silent.
    Unknown,
}

impl Command {
    /// Parse message text. Tokens are whitespace separated and matched
    /// case-sensitively on the first token.
    pub fn parse(text: &str) -> Self {
        let tokens = tokenize(text);

        match tokens.as_slice() {
            ["hello"] => Command::Hello,
            ["image"] => Command::ShowImage { name: None },
            ["image", name] => Command::ShowImage {
                name: Some((*name).to_string()),
            },
            ["imageList"] => Command::ListImages,
            ["updateImage", name, url] => Command::SaveImage {
                name: (*name).to_string(),
                url: unwrap_link(url),
            },
            ["updateImage", ..] => Command::InvalidSaveImage,
            _ => Command::Unknown,
        }
    }
}

/// Split on whitespace, keeping Slack markup such as `<https://x|a label>` as
/// one token even when the label contains spaces.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let markup_end = if rest.starts_with('<') {
            rest.find('>').map(|i| i + 1)
        } else {
            None
        };
        let end = markup_end
            .or_else(|| rest.find(char::is_whitespace))
            .unwrap_or(rest.len());

        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    tokens
}

/// Strip Slack's link markup: `<https://x>` and `<https://x|label>` become
/// `https://x`, and `&amp;` is decoded.
pub fn unwrap_link(raw: &str) -> String {
    let inner = raw
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .map(|s| s.split('|').next().unwrap_or(s))
        .unwrap_or(raw);

    inner.replace("&amp;", "&")
}
