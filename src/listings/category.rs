//! Static category catalog.
//!
//! Categories are configuration, not derived from listings. Each entry has a
//! display name, the icon reference used by the mobile design, and a short
//! glyph for the terminal chip row. Name lookups go through [`CategoryId`]
//! so the rest of the crate never matches on raw strings.

/// Identifier for every category in the catalog, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryId {
    TinyHomes,
    Cabins,
    Trending,
    Play,
    City,
    Beachfront,
    Countryside,
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub icon: &'static str,
    pub glyph: &'static str,
}

/// The ordered catalog shown in the explorer header.
pub const CATALOG: [Category; 7] = [
    Category {
        id: CategoryId::TinyHomes,
        name: "Tiny homes",
        icon: "home",
        glyph: "⌂",
    },
    Category {
        id: CategoryId::Cabins,
        name: "Cabins",
        icon: "house-siding",
        glyph: "▲",
    },
    Category {
        id: CategoryId::Trending,
        name: "Trending",
        icon: "local-fire-department",
        glyph: "♨",
    },
    Category {
        id: CategoryId::Play,
        name: "Play",
        icon: "videogame-asset",
        glyph: "♣",
    },
    Category {
        id: CategoryId::City,
        name: "City",
        icon: "apartment",
        glyph: "▦",
    },
    Category {
        id: CategoryId::Beachfront,
        name: "Beachfront",
        icon: "beach-access",
        glyph: "☂",
    },
    Category {
        id: CategoryId::Countryside,
        name: "Countryside",
        icon: "nature-people",
        glyph: "♧",
    },
];

impl CategoryId {
    /// Resolve a display name (case-insensitive) to its identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        CATALOG
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
            .map(|c| c.id)
    }

    /// Catalog entry for this identifier.
    pub fn entry(self) -> &'static Category {
        // CATALOG is declared in enum order.
        &CATALOG[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Position in the catalog.
    pub fn index(self) -> usize {
        match self {
            Self::TinyHomes => 0,
            Self::Cabins => 1,
            Self::Trending => 2,
            Self::Play => 3,
            Self::City => 4,
            Self::Beachfront => 5,
            Self::Countryside => 6,
        }
    }

    /// Identifier at catalog position `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        CATALOG.get(index).map(|c| c.id)
    }
}
