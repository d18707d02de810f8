use std::collections::BTreeMap;

/// Whether a currency is a cryptocurrency or a fiat currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrencyKind {
    Crypto,
    Fiat,
}

impl std::str::FromStr for CurrencyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crypto" => Ok(CurrencyKind::Crypto),
            "fiat" => Ok(CurrencyKind::Fiat),
            other => Err(format!("unknown currency kind: {}", other)),
        }
    }
}

impl std::fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyKind::Crypto => write!(f, "crypto"),
            CurrencyKind::Fiat => write!(f, "fiat"),
        }
    }
}

/// The currency codes a fee may be denominated in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySet {
    currencies: BTreeMap<String, CurrencyKind>,
}

impl CurrencySet {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self {
            currencies: BTreeMap::new(),
        }
    }

    pub fn new<I, S>(currencies: I) -> Self
    where
        I: IntoIterator<Item = (S, CurrencyKind)>,
        S: Into<String>,
    {
        Self {
            currencies: currencies
                .into_iter()
                .map(|(code, kind)| (code.into(), kind))
                .collect(),
        }
    }

    pub fn insert(&mut self, code: impl Into<String>, kind: CurrencyKind) {
        self.currencies.insert(code.into(), kind);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(code)
    }

    pub fn kind(&self, code: &str) -> Option<CurrencyKind> {
        self.currencies.get(code).copied()
    }

    /// Supported codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl Default for CurrencySet {
    /// BTC, LBC and USD.
    fn default() -> Self {
        Self::new([
            ("BTC", CurrencyKind::Crypto),
            ("LBC", CurrencyKind::Crypto),
            ("USD", CurrencyKind::Fiat),
        ])
    }
}
