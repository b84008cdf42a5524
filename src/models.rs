use serde::{Deserialize, Serialize};

/// A single GIF link stored in the program account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GifItem {
    pub gif_link: String,
    /// Base58 address of the wallet that submitted the link
    pub user_address: String,
}

impl GifItem {
    pub fn new(gif_link: impl Into<String>, user_address: impl Into<String>) -> Self {
        GifItem {
            gif_link: gif_link.into(),
            user_address: user_address.into(),
        }
    }
}

/// Locally held view of the remote GIF list
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum GifList {
    /// Nothing fetched yet; rendered as an empty list
    #[default]
    NotLoaded,
    Loaded(Vec<GifItem>),
    /// The base account does not exist yet and needs one-time initialization
    AccountMissing,
}

impl GifList {
    /// Items to display; empty unless loaded
    pub fn items(&self) -> &[GifItem] {
        match self {
            GifList::Loaded(items) => items,
            GifList::NotLoaded | GifList::AccountMissing => &[],
        }
    }

    pub fn is_account_missing(&self) -> bool {
        matches!(self, GifList::AccountMissing)
    }
}

/// Which of the mutually exclusive panels is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum View {
    /// No session: the connect action
    #[default]
    Unconnected,
    /// Session present, base account missing: one-time initialization
    Setup,
    /// Session present: input field and GIF list
    Gallery,
}

impl View {
    pub fn derive(address: Option<&str>, gifs: &GifList) -> View {
        match address {
            None => View::Unconnected,
            Some(_) if gifs.is_account_missing() => View::Setup,
            Some(_) => View::Gallery,
        }
    }
}

/// Severity of an activity log entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Success,
    Error,
}

/// A timestamped line in the activity log
#[derive(Clone, Debug)]
pub struct ActivityEntry {
    pub level: ActivityLevel,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ActivityEntry {
    pub fn new(level: ActivityLevel, message: impl Into<String>) -> Self {
        ActivityEntry {
            level,
            message: message.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Shortens an address to `ab...wxyz` for display
pub fn abbreviate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 6 {
        return address.to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_address() {
        assert_eq!(
            abbreviate_address("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"),
            "7x...gAsU"
        );
        assert_eq!(abbreviate_address("Addr1"), "Addr1");
        assert_eq!(abbreviate_address("ééééééé"), "éé...éééé");
    }

    #[test]
    fn test_view_is_exhaustive_over_session() {
        let loaded = GifList::Loaded(vec![GifItem::new("https://x/1.gif", "Addr1")]);
        assert_eq!(View::derive(None, &loaded), View::Unconnected);
        assert_eq!(View::derive(None, &GifList::AccountMissing), View::Unconnected);
        assert_eq!(View::derive(Some("Addr1"), &GifList::AccountMissing), View::Setup);
        assert_eq!(View::derive(Some("Addr1"), &GifList::NotLoaded), View::Gallery);
        assert_eq!(View::derive(Some("Addr1"), &loaded), View::Gallery);
    }

    #[test]
    fn test_items_empty_unless_loaded() {
        assert!(GifList::NotLoaded.items().is_empty());
        assert!(GifList::AccountMissing.items().is_empty());
        let loaded = GifList::Loaded(vec![GifItem::new("a", "b")]);
        assert_eq!(loaded.items().len(), 1);
    }
}
