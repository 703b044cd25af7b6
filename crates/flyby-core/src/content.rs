//! Static content carried by flying elements.

use std::fmt;

use crate::rng::RandomSource;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Social-media card shown by a social element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SocialKind {
    /// Photo post with likes and comments.
    Instagram,
    /// Vertical video with a play badge.
    TikTok,
    /// Single comment bubble.
    Comment,
    /// Short-form video tile.
    Shorts,
    /// "Someone liked your post" toast.
    Notification,
}

impl SocialKind {
    /// Every card kind.
    pub const ALL: [SocialKind; 5] = [
        SocialKind::Instagram,
        SocialKind::TikTok,
        SocialKind::Comment,
        SocialKind::Shorts,
        SocialKind::Notification,
    ];

    /// Picks a kind uniformly.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Short identifier, stable across versions.
    pub fn name(self) -> &'static str {
        match self {
            SocialKind::Instagram => "instagram",
            SocialKind::TikTok => "tiktok",
            SocialKind::Comment => "comment",
            SocialKind::Shorts => "shorts",
            SocialKind::Notification => "notification",
        }
    }

    /// Account name printed on the card.
    pub fn handle(self) -> &'static str {
        match self {
            SocialKind::Instagram => "insta_user",
            SocialKind::TikTok => "@tiktoker",
            SocialKind::Comment => "komentator42",
            SocialKind::Shorts => "Shorts #viral",
            SocialKind::Notification => "Marta i 23 inne osoby",
        }
    }

    /// Body text of the card, if it has one.
    pub fn caption(self) -> Option<&'static str> {
        match self {
            SocialKind::Instagram => Some("\u{2764}\u{fe0f} 1.2k  \u{1f4ac} 45"),
            SocialKind::Comment => Some("Ale super filmik! \u{1f60d}"),
            SocialKind::Notification => Some("polubiły Twój post"),
            SocialKind::TikTok | SocialKind::Shorts => None,
        }
    }
}

impl fmt::Display for SocialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emoji shown by an emoji element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Glyph {
    /// ❤️
    Heart,
    /// 👍
    ThumbsUp,
    /// 😍
    HeartEyes,
    /// 🔥
    Fire,
    /// 😂
    TearsOfJoy,
    /// 👏
    Clap,
    /// 💯
    Hundred,
    /// 🙌
    RaisedHands,
    /// 💬
    SpeechBalloon,
    /// 🎵
    Music,
}

impl Glyph {
    /// Every glyph.
    pub const ALL: [Glyph; 10] = [
        Glyph::Heart,
        Glyph::ThumbsUp,
        Glyph::HeartEyes,
        Glyph::Fire,
        Glyph::TearsOfJoy,
        Glyph::Clap,
        Glyph::Hundred,
        Glyph::RaisedHands,
        Glyph::SpeechBalloon,
        Glyph::Music,
    ];

    /// Picks a glyph uniformly.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// The emoji as text.
    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Heart => "\u{2764}\u{fe0f}",
            Glyph::ThumbsUp => "\u{1f44d}",
            Glyph::HeartEyes => "\u{1f60d}",
            Glyph::Fire => "\u{1f525}",
            Glyph::TearsOfJoy => "\u{1f602}",
            Glyph::Clap => "\u{1f44f}",
            Glyph::Hundred => "\u{1f4af}",
            Glyph::RaisedHands => "\u{1f64c}",
            Glyph::SpeechBalloon => "\u{1f4ac}",
            Glyph::Music => "\u{1f3b5}",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an element displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElementContent {
    /// A social-media card.
    Social(SocialKind),
    /// An emoji.
    Emoji(Glyph),
}

impl fmt::Display for ElementContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementContent::Social(kind) => write!(f, "{kind}"),
            ElementContent::Emoji(glyph) => write!(f, "{glyph}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FlybyRng, SequenceRandom};
    use std::collections::HashSet;

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = FlybyRng::new(8);
        let seen: HashSet<_> = (0..500).map(|_| SocialKind::random(&mut rng)).collect();
        assert_eq!(seen.len(), SocialKind::ALL.len());
    }

    #[test]
    fn test_random_glyph_covers_all() {
        let mut rng = FlybyRng::new(8);
        let seen: HashSet<_> = (0..500).map(|_| Glyph::random(&mut rng)).collect();
        assert_eq!(seen.len(), Glyph::ALL.len());
    }

    #[test]
    fn test_selection_follows_random_source() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.99, 0.45]);
        assert_eq!(SocialKind::random(&mut rng), SocialKind::Instagram);
        assert_eq!(SocialKind::random(&mut rng), SocialKind::Notification);
        assert_eq!(Glyph::random(&mut rng), Glyph::TearsOfJoy);
    }

    #[test]
    fn test_display() {
        assert_eq!(ElementContent::Social(SocialKind::TikTok).to_string(), "tiktok");
        assert_eq!(ElementContent::Emoji(Glyph::Fire).to_string(), "\u{1f525}");
        assert!(SocialKind::Shorts.caption().is_none());
        assert_eq!(SocialKind::Comment.handle(), "komentator42");
    }
}
