//! Static sector and industry membership tables.
//!
//! Sectors map to their SPDR ETF proxy; industries map to representative
//! peer instruments, listed roughly by market weight. The aggregation layer
//! consumes the first few peers of a group; membership itself is input data,
//! not something this crate derives.

pub const SECTOR_ETFS: &[(&str, &str)] = &[
    ("Technology", "XLK"),
    ("Financials", "XLF"),
    ("Healthcare", "XLV"),
    ("Consumer Discretionary", "XLY"),
    ("Industrials", "XLI"),
    ("Consumer Staples", "XLP"),
    ("Energy", "XLE"),
    ("Utilities", "XLU"),
    ("Real Estate", "XLRE"),
    ("Materials", "XLB"),
    ("Communications", "XLC"),
];

pub const INDUSTRY_PEERS: &[(&str, &[&str])] = &[
    ("Semiconductors", &["NVDA", "AMD", "INTC", "MU", "QCOM"]),
    ("Software", &["MSFT", "CRM", "ADBE", "NOW", "ORCL"]),
    ("Internet", &["GOOGL", "META", "AMZN", "NFLX", "UBER"]),
    ("Hardware", &["AAPL", "DELL", "HPQ", "CSCO", "IBM"]),
    ("Cybersecurity", &["CRWD", "PANW", "ZS", "OKTA", "S"]),
    ("Banks", &["JPM", "BAC", "WFC", "C", "GS"]),
    ("Insurance", &["BRK.B", "UNH", "AIG", "MET", "PRU"]),
    ("Asset Management", &["BLK", "MS", "SCHW", "CME", "ICE"]),
    ("Fintech", &["V", "MA", "PYPL", "SQ", "COIN"]),
    ("Pharma", &["JNJ", "PFE", "MRK", "ABBV", "LLY"]),
    ("Biotech", &["AMGN", "GILD", "BIIB", "VRTX", "REGN"]),
    ("Medical Devices", &["ABT", "MDT", "TMO", "DHR", "SYK"]),
    ("Retail", &["WMT", "AMZN", "HD", "COST", "TGT"]),
    ("Auto", &["TSLA", "F", "GM", "RIVN", "NIO"]),
    ("Restaurants", &["MCD", "SBUX", "CMG", "YUM", "DPZ"]),
    ("Aerospace", &["BA", "LMT", "RTX", "NOC", "GD"]),
    ("Transport", &["UPS", "FDX", "UNP", "CSX", "DAL"]),
    ("Machinery", &["CAT", "DE", "MMM", "HON", "EMR"]),
    ("Oil & Gas", &["XOM", "CVX", "COP", "SLB", "OXY"]),
    ("Renewable", &["NEE", "ENPH", "SEDG", "RUN", "PLUG"]),
];

pub fn sector_etf(name: &str) -> Option<&'static str> {
    SECTOR_ETFS
        .iter()
        .find(|(sector, _)| sector.eq_ignore_ascii_case(name))
        .map(|(_, etf)| *etf)
}

pub fn industry_peers(name: &str) -> Option<&'static [&'static str]> {
    INDUSTRY_PEERS
        .iter()
        .find(|(industry, _)| industry.eq_ignore_ascii_case(name))
        .map(|(_, peers)| *peers)
}

pub fn sector_names() -> impl Iterator<Item = &'static str> {
    SECTOR_ETFS.iter().map(|(sector, _)| *sector)
}

pub fn industry_names() -> impl Iterator<Item = &'static str> {
    INDUSTRY_PEERS.iter().map(|(industry, _)| *industry)
}
