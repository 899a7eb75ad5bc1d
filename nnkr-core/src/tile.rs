//! Tile model for the trainer.
//!
//! Tiles are ids 0-33: seven honors first (four winds, then three dragons),
//! followed by the man, sou and pin suits at 7, 16 and 25. Hands are kept as
//! a 34-slot count vector so the search code can index by tile id directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{NnkrError, NnkrResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile types (0-33).
pub const NUM_TILE_TYPES: usize = 34;

/// Number of ranks in a numeral suit.
pub const NUM_SUIT_TILES: u8 = 9;

/// Copies of each tile in a set; also the per-hand cap.
pub const MAX_COPIES: u8 = 4;

/// Tiles in a hand waiting to draw.
pub const HAND_SIZE: usize = 13;

/// Tiles in a hand that must discard.
pub const DRAWN_HAND_SIZE: usize = 14;

pub const HONOR_START: u8 = 0;
pub const MAN_START: u8 = 7;
pub const SOU_START: u8 = 16;
pub const PIN_START: u8 = 25;

pub const EAST: u8 = 0;
pub const SOUTH: u8 = 1;
pub const WEST: u8 = 2;
pub const NORTH: u8 = 3;
pub const RED: u8 = 4;
pub const GREEN: u8 = 5;
pub const WHITE: u8 = 6;

/// Start ids of the three numeral suits, in id order.
pub const NUMERAL_STARTS: [u8; 3] = [MAN_START, SOU_START, PIN_START];

// ---------------------------------------------------------------------------
// Suit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Honor,
    Man,
    Sou,
    Pin,
}

impl Suit {
    /// First tile id of this suit.
    #[inline]
    pub const fn start(self) -> u8 {
        match self {
            Suit::Honor => HONOR_START,
            Suit::Man => MAN_START,
            Suit::Sou => SOU_START,
            Suit::Pin => PIN_START,
        }
    }

    /// Letter used in mspz notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            Suit::Honor => 'z',
            Suit::Man => 'm',
            Suit::Sou => 's',
            Suit::Pin => 'p',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'z' => Some(Suit::Honor),
            'm' => Some(Suit::Man),
            's' => Some(Suit::Sou),
            'p' => Some(Suit::Pin),
            _ => None,
        }
    }

    /// Highest number the suit accepts in mspz notation.
    const fn max_number(self) -> u8 {
        match self {
            Suit::Honor => 7,
            _ => NUM_SUIT_TILES,
        }
    }
}

// ---------------------------------------------------------------------------
// Tile newtype
// ---------------------------------------------------------------------------

/// A tile id in the range 0-33.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tile(u8);

impl Tile {
    /// Creates a `Tile` if `id` is in range 0..34.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if (id as usize) < NUM_TILE_TYPES {
            Some(Tile(id))
        } else {
            None
        }
    }

    /// Like [`Tile::new`] but reports the offending id.
    pub fn try_new(id: u32) -> NnkrResult<Self> {
        u8::try_from(id)
            .ok()
            .and_then(Tile::new)
            .ok_or(NnkrError::OutOfRange { id })
    }

    /// Iterates all 34 tiles in id order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..NUM_TILE_TYPES as u8).map(Tile)
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn suit(self) -> Suit {
        match self.0 {
            0..=6 => Suit::Honor,
            7..=15 => Suit::Man,
            16..=24 => Suit::Sou,
            _ => Suit::Pin,
        }
    }

    /// 1-based rank within a numeral suit, or `None` for honors.
    #[inline]
    pub const fn rank(self) -> Option<u8> {
        match self.suit() {
            Suit::Honor => None,
            suit => Some(self.0 - suit.start() + 1),
        }
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 < MAN_START
    }

    #[inline]
    pub const fn is_wind(self) -> bool {
        self.0 <= NORTH
    }

    #[inline]
    pub const fn is_dragon(self) -> bool {
        self.0 >= RED && self.0 <= WHITE
    }

    #[inline]
    pub const fn is_numeral(self) -> bool {
        !self.is_honor()
    }
}

impl TryFrom<u8> for Tile {
    type Error = NnkrError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Tile::new(id).ok_or(NnkrError::OutOfRange { id: id as u32 })
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> u8 {
        tile.0
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile({}={})", self.0, self)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = self.suit();
        write!(f, "{}{}", self.0 - suit.start() + 1, suit.letter())
    }
}

impl std::str::FromStr for Tile {
    type Err = NnkrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_mspz(s)
    }
}

/// The four winds in seat order.
pub const WINDS: [Tile; 4] = [Tile(EAST), Tile(SOUTH), Tile(WEST), Tile(NORTH)];

// ---------------------------------------------------------------------------
// Counting and dora successor
// ---------------------------------------------------------------------------

/// Histogram of a tile list over the 34 tile ids.
pub fn tile_count(tiles: &[Tile]) -> [u8; NUM_TILE_TYPES] {
    let mut counts = [0u8; NUM_TILE_TYPES];
    for tile in tiles {
        counts[tile.index()] += 1;
    }
    counts
}

/// The dora indicated by `indicator`.
///
/// Winds cycle E→S→W→N→E. Dragons cycle white→green→red→white, which in
/// id order is 6→5→4→6. Numerals advance one rank and 9 wraps to 1.
pub fn next_tile_in_sequence(indicator: Tile) -> Tile {
    let t = indicator.0;
    let next = match indicator.suit() {
        Suit::Honor if indicator.is_wind() => (t + 1) % 4,
        Suit::Honor => (t + 1) % 3 + RED,
        suit => {
            let offset = t - suit.start();
            suit.start() + (offset + 1) % NUM_SUIT_TILES
        }
    };
    Tile(next)
}

// ---------------------------------------------------------------------------
// Hand
// ---------------------------------------------------------------------------

/// A multiset of tiles stored as per-id counts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    counts: [u8; NUM_TILE_TYPES],
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

impl Hand {
    pub const fn new() -> Self {
        Self {
            counts: [0; NUM_TILE_TYPES],
        }
    }

    /// Builds a hand, rejecting a fifth copy of any tile.
    pub fn from_tiles(tiles: &[Tile]) -> NnkrResult<Self> {
        let mut hand = Hand::new();
        for &tile in tiles {
            hand.add(tile)?;
        }
        Ok(hand)
    }

    /// Builds a hand from raw counts.
    pub fn from_counts(counts: [u8; NUM_TILE_TYPES]) -> NnkrResult<Self> {
        if let Some(id) = counts.iter().position(|&c| c > MAX_COPIES) {
            return Err(NnkrError::InvalidHand {
                message: format!("{} copies of {}", counts[id], Tile(id as u8)),
            });
        }
        Ok(Self { counts })
    }

    #[inline]
    pub fn counts(&self) -> &[u8; NUM_TILE_TYPES] {
        &self.counts
    }

    #[inline]
    pub fn count(&self, tile: Tile) -> u8 {
        self.counts[tile.index()]
    }

    #[inline]
    pub fn contains(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn add(&mut self, tile: Tile) -> NnkrResult<()> {
        let slot = &mut self.counts[tile.index()];
        if *slot >= MAX_COPIES {
            return Err(NnkrError::InvalidHand {
                message: format!("more than {} copies of {}", MAX_COPIES, tile),
            });
        }
        *slot += 1;
        Ok(())
    }

    /// Removes one copy of `tile`. Returns `false` if the hand had none.
    pub fn remove(&mut self, tile: Tile) -> bool {
        let slot = &mut self.counts[tile.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Copy of this hand with one more `tile`, or `None` at the copy cap.
    pub fn with(&self, tile: Tile) -> Option<Hand> {
        let mut next = *self;
        next.add(tile).ok().map(|_| next)
    }

    /// Copy of this hand with one `tile` taken out, or `None` if absent.
    pub fn without(&self, tile: Tile) -> Option<Hand> {
        let mut next = *self;
        next.remove(tile).then_some(next)
    }

    /// Distinct tiles present, ascending.
    pub fn distinct(&self) -> impl Iterator<Item = Tile> + '_ {
        Tile::all().filter(|&t| self.contains(t))
    }

    /// All tiles, ascending, with repeats.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut out = Vec::with_capacity(self.len());
        for tile in Tile::all() {
            for _ in 0..self.count(tile) {
                out.push(tile);
            }
        }
        out
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({})", self)
    }
}

/// Compact mspz form, e.g. `123m45s11z`.
impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for suit in [Suit::Man, Suit::Sou, Suit::Pin, Suit::Honor] {
            let mut any = false;
            for tile in self.tiles().into_iter().filter(|t| t.suit() == suit) {
                write!(f, "{}", tile.0 - suit.start() + 1)?;
                any = true;
            }
            if any {
                write!(f, "{}", suit.letter())?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notation and rendering
// ---------------------------------------------------------------------------

const UNICODE_BASE: u32 = 0x1F000;
const TEXT_PRESENTATION: char = '\u{FE0E}';

/// Unicode Mahjong glyph for a tile id.
///
/// The red dragon glyph defaults to emoji presentation on most platforms, so
/// it carries a text-presentation selector.
pub fn tile_to_unicode(id: u32) -> NnkrResult<String> {
    let tile = Tile::try_new(id)?;
    let mut out = String::new();
    out.extend(char::from_u32(UNICODE_BASE + tile.index() as u32));
    if tile.0 == RED {
        out.push(TEXT_PRESENTATION);
    }
    Ok(out)
}

/// Glyphs for a hand, sorted ascending.
pub fn hand_to_unicode(tiles: &[Tile]) -> String {
    let mut sorted = tiles.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .filter_map(|t| tile_to_unicode(t.0 as u32).ok())
        .collect()
}

fn parse_error(input: &str, message: impl Into<String>) -> NnkrError {
    NnkrError::Parse {
        input: input.to_string(),
        message: message.into(),
    }
}

fn tile_from_number(input: &str, number: u8, suit: Suit) -> NnkrResult<Tile> {
    if number == 0 || number > suit.max_number() {
        return Err(parse_error(
            input,
            format!("{}{} is not a tile", number, suit.letter()),
        ));
    }
    Ok(Tile(suit.start() + number - 1))
}

/// Parses a single tile such as `3s` or `7z`.
pub fn parse_mspz(input: &str) -> NnkrResult<Tile> {
    let mut chars = input.trim().chars();
    let (Some(digit), Some(letter), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(parse_error(input, "expected a digit followed by m, s, p or z"));
    };
    let number = digit
        .to_digit(10)
        .ok_or_else(|| parse_error(input, "expected a digit"))?;
    let suit = Suit::from_letter(letter)
        .ok_or_else(|| parse_error(input, format!("unknown suit '{}'", letter)))?;
    tile_from_number(input, number as u8, suit)
}

/// Parses compact notation such as `123m456s11z`.
pub fn parse_hand(input: &str) -> NnkrResult<Vec<Tile>> {
    let mut tiles = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    for c in input.chars().filter(|c| !c.is_whitespace()) {
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
            continue;
        }
        let suit = Suit::from_letter(c)
            .ok_or_else(|| parse_error(input, format!("unknown suit '{}'", c)))?;
        if pending.is_empty() {
            return Err(parse_error(input, format!("suit '{}' has no numbers", c)));
        }
        for number in pending.drain(..) {
            tiles.push(tile_from_number(input, number, suit)?);
        }
    }
    if !pending.is_empty() {
        return Err(parse_error(input, "trailing numbers without a suit"));
    }
    Ok(tiles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
