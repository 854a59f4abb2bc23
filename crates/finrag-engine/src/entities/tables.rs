//! Static lookup tables for financial entity extraction
//!
//! Curated dictionaries for named stock groups, company aliases, sector
//! keywords and the ticker allow/deny lists. All keys are lower-case; the
//! extractor folds input text once before matching.

/// Named stock groups and their constituent tickers
pub const STOCK_GROUPS: &[(&str, &[&str])] = &[
    ("faang", &["META", "AAPL", "AMZN", "NFLX", "GOOGL"]),
    ("fang", &["META", "AAPL", "NFLX", "GOOGL"]),
    ("mag 7", &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META"]),
    (
        "magnificent 7",
        &["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA", "META"],
    ),
    ("big tech", &["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"]),
    (
        "mega cap tech",
        &["AAPL", "MSFT", "GOOGL", "AMZN", "META", "NVDA"],
    ),
    ("s&p 500", &["SPY"]),
    ("sp500", &["SPY"]),
    ("spy", &["SPY"]),
    ("qqq", &["QQQ"]),
    (
        "semiconductor stocks",
        &["NVDA", "AMD", "INTC", "QCOM", "AVGO", "MU"],
    ),
    ("chip stocks", &["NVDA", "AMD", "INTC", "QCOM", "AVGO", "MU"]),
    ("bank stocks", &["JPM", "BAC", "WFC", "C", "GS", "MS"]),
    ("oil stocks", &["XOM", "CVX", "COP", "EOG", "SLB"]),
    ("airline stocks", &["DAL", "UAL", "AAL", "LUV"]),
    ("ev stocks", &["TSLA", "F", "GM", "RIVN", "LCID"]),
    (
        "electric vehicle stocks",
        &["TSLA", "F", "GM", "RIVN", "LCID"],
    ),
    ("pharma stocks", &["JNJ", "PFE", "MRK", "ABBV", "LLY", "BMY"]),
    ("biotech stocks", &["GILD", "AMGN", "BIIB", "REGN", "VRTX"]),
    ("reit stocks", &["AMT", "PLD", "CCI", "EQIX", "SPG", "O"]),
    ("meme stocks", &["GME", "AMC", "BB", "NOK"]),
    ("chinese stocks", &["BABA", "JD", "PDD", "BIDU", "NIO"]),
    ("social media stocks", &["META", "SNAP", "PINS"]),
    ("streaming stocks", &["NFLX", "DIS", "ROKU", "PARA"]),
];

/// Stock group to sector mapping
pub const GROUP_SECTORS: &[(&str, &str)] = &[
    ("faang", "Technology"),
    ("fang", "Technology"),
    ("mag 7", "Technology"),
    ("magnificent 7", "Technology"),
    ("big tech", "Technology"),
    ("mega cap tech", "Technology"),
    ("semiconductor stocks", "Technology"),
    ("chip stocks", "Technology"),
    ("bank stocks", "Banking"),
    ("oil stocks", "Energy"),
    ("airline stocks", "Industrials"),
    ("ev stocks", "Consumer Discretionary"),
    ("electric vehicle stocks", "Consumer Discretionary"),
    ("pharma stocks", "Healthcare"),
    ("biotech stocks", "Healthcare"),
    ("reit stocks", "Real Estate"),
    ("chinese stocks", "International"),
    ("social media stocks", "Communication Services"),
    ("streaming stocks", "Communication Services"),
];

/// Company alias to ticker mapping (matched longest-alias-first)
pub const COMPANY_ALIASES: &[(&str, &str)] = &[
    // Technology
    ("apple inc", "AAPL"),
    ("apple", "AAPL"),
    ("microsoft corporation", "MSFT"),
    ("microsoft corp", "MSFT"),
    ("microsoft", "MSFT"),
    ("alphabet inc", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("google", "GOOGL"),
    ("amazon.com", "AMZN"),
    ("amazon", "AMZN"),
    ("meta platforms", "META"),
    ("facebook", "META"),
    ("meta", "META"),
    ("nvidia corporation", "NVDA"),
    ("nvidia corp", "NVDA"),
    ("nvidia", "NVDA"),
    ("tesla motors", "TSLA"),
    ("tesla inc", "TSLA"),
    ("tesla", "TSLA"),
    ("netflix", "NFLX"),
    ("adobe inc", "ADBE"),
    ("adobe", "ADBE"),
    ("salesforce.com", "CRM"),
    ("salesforce", "CRM"),
    ("oracle corp", "ORCL"),
    ("oracle", "ORCL"),
    ("intel corp", "INTC"),
    ("intel", "INTC"),
    ("cisco systems", "CSCO"),
    ("cisco", "CSCO"),
    ("international business machines", "IBM"),
    ("ibm", "IBM"),
    ("advanced micro devices", "AMD"),
    ("amd", "AMD"),
    // Healthcare
    ("johnson & johnson", "JNJ"),
    ("johnson and johnson", "JNJ"),
    ("j&j", "JNJ"),
    ("pfizer inc", "PFE"),
    ("pfizer", "PFE"),
    ("unitedhealth group", "UNH"),
    ("unitedhealth", "UNH"),
    ("united health", "UNH"),
    ("merck & co", "MRK"),
    ("merck", "MRK"),
    ("abbvie inc", "ABBV"),
    ("abbvie", "ABBV"),
    ("eli lilly", "LLY"),
    ("lilly", "LLY"),
    ("bristol myers squibb", "BMY"),
    ("bristol myers", "BMY"),
    ("moderna inc", "MRNA"),
    ("moderna", "MRNA"),
    ("gilead sciences", "GILD"),
    ("gilead", "GILD"),
    ("amgen inc", "AMGN"),
    ("amgen", "AMGN"),
    // Financial
    ("jpmorgan chase", "JPM"),
    ("jp morgan", "JPM"),
    ("jpmorgan", "JPM"),
    ("chase", "JPM"),
    ("goldman sachs", "GS"),
    ("goldman", "GS"),
    ("morgan stanley", "MS"),
    ("bank of america", "BAC"),
    ("bofa", "BAC"),
    ("wells fargo", "WFC"),
    ("citigroup", "C"),
    ("citibank", "C"),
    ("citi", "C"),
    ("american express", "AXP"),
    ("amex", "AXP"),
    ("visa inc", "V"),
    ("visa", "V"),
    ("mastercard inc", "MA"),
    ("mastercard", "MA"),
    ("paypal holdings", "PYPL"),
    ("paypal", "PYPL"),
    ("berkshire hathaway", "BRK.B"),
    ("berkshire", "BRK.B"),
    // Energy
    ("exxon mobil", "XOM"),
    ("exxonmobil", "XOM"),
    ("exxon", "XOM"),
    ("chevron corp", "CVX"),
    ("chevron", "CVX"),
    ("conocophillips", "COP"),
    ("marathon petroleum", "MPC"),
    ("valero energy", "VLO"),
    ("valero", "VLO"),
    ("phillips 66", "PSX"),
    // Consumer
    ("walmart inc", "WMT"),
    ("walmart", "WMT"),
    ("the home depot", "HD"),
    ("home depot", "HD"),
    ("mcdonald's", "MCD"),
    ("mcdonalds", "MCD"),
    ("nike inc", "NKE"),
    ("nike", "NKE"),
    ("starbucks corp", "SBUX"),
    ("starbucks", "SBUX"),
    ("walt disney", "DIS"),
    ("disney", "DIS"),
    ("ford motor", "F"),
    ("ford", "F"),
    ("general motors", "GM"),
    ("target corp", "TGT"),
    ("target", "TGT"),
    ("lowe's", "LOW"),
    ("lowes", "LOW"),
    ("coca-cola", "KO"),
    ("coca cola", "KO"),
    ("pepsico", "PEP"),
    ("pepsi", "PEP"),
    ("procter & gamble", "PG"),
    ("procter and gamble", "PG"),
    ("p&g", "PG"),
    ("costco wholesale", "COST"),
    ("costco", "COST"),
    ("general mills", "GIS"),
    ("kellogg company", "K"),
    ("kellogg", "K"),
    // Industrials
    ("boeing company", "BA"),
    ("boeing", "BA"),
    ("caterpillar inc", "CAT"),
    ("caterpillar", "CAT"),
    ("general electric", "GE"),
    ("lockheed martin", "LMT"),
    ("raytheon technologies", "RTX"),
    ("raytheon", "RTX"),
    ("federal express", "FDX"),
    ("fedex", "FDX"),
    ("united parcel service", "UPS"),
    ("union pacific", "UNP"),
    // Communication Services
    ("verizon communications", "VZ"),
    ("verizon", "VZ"),
    ("at&t", "T"),
    ("t-mobile", "TMUS"),
    ("tmobile", "TMUS"),
    ("comcast corp", "CMCSA"),
    ("comcast", "CMCSA"),
    ("charter communications", "CHTR"),
    // Utilities
    ("nextera energy", "NEE"),
    ("nextera", "NEE"),
    ("duke energy", "DUK"),
    ("southern company", "SO"),
    ("dominion energy", "D"),
    // Real Estate
    ("american tower", "AMT"),
    ("prologis", "PLD"),
    ("crown castle", "CCI"),
    ("realty income", "O"),
    ("simon property", "SPG"),
    // International
    ("taiwan semiconductor", "TSM"),
    ("tsmc", "TSM"),
    ("asml", "ASML"),
    ("alibaba", "BABA"),
    ("tencent", "TCEHY"),
];

/// Company directory: ticker, display name, sector
///
/// Supplements the quote provider, which exposes no profile endpoint.
pub const COMPANY_DIRECTORY: &[(&str, &str, &str)] = &[
    ("AAPL", "Apple", "Technology"),
    ("MSFT", "Microsoft", "Technology"),
    ("GOOGL", "Alphabet", "Technology"),
    ("AMZN", "Amazon", "Consumer Discretionary"),
    ("META", "Meta Platforms", "Technology"),
    ("NVDA", "Nvidia", "Technology"),
    ("TSLA", "Tesla", "Consumer Discretionary"),
    ("NFLX", "Netflix", "Communication Services"),
    ("ADBE", "Adobe", "Technology"),
    ("CRM", "Salesforce", "Technology"),
    ("ORCL", "Oracle", "Technology"),
    ("INTC", "Intel", "Technology"),
    ("CSCO", "Cisco Systems", "Technology"),
    ("IBM", "IBM", "Technology"),
    ("AMD", "Advanced Micro Devices", "Technology"),
    ("QCOM", "Qualcomm", "Technology"),
    ("AVGO", "Broadcom", "Technology"),
    ("MU", "Micron Technology", "Technology"),
    ("TSM", "Taiwan Semiconductor", "Technology"),
    ("ASML", "ASML", "Technology"),
    ("JNJ", "Johnson & Johnson", "Healthcare"),
    ("PFE", "Pfizer", "Healthcare"),
    ("UNH", "UnitedHealth Group", "Healthcare"),
    ("MRK", "Merck", "Healthcare"),
    ("ABBV", "AbbVie", "Healthcare"),
    ("LLY", "Eli Lilly", "Healthcare"),
    ("BMY", "Bristol Myers Squibb", "Healthcare"),
    ("MRNA", "Moderna", "Healthcare"),
    ("GILD", "Gilead Sciences", "Healthcare"),
    ("AMGN", "Amgen", "Healthcare"),
    ("BIIB", "Biogen", "Healthcare"),
    ("REGN", "Regeneron", "Healthcare"),
    ("VRTX", "Vertex Pharmaceuticals", "Healthcare"),
    ("TMO", "Thermo Fisher Scientific", "Healthcare"),
    ("ABT", "Abbott Laboratories", "Healthcare"),
    ("JPM", "JPMorgan Chase", "Financial"),
    ("BAC", "Bank of America", "Financial"),
    ("WFC", "Wells Fargo", "Financial"),
    ("C", "Citigroup", "Financial"),
    ("GS", "Goldman Sachs", "Financial"),
    ("MS", "Morgan Stanley", "Financial"),
    ("AXP", "American Express", "Financial"),
    ("V", "Visa", "Financial"),
    ("MA", "Mastercard", "Financial"),
    ("PYPL", "PayPal", "Financial"),
    ("BRK.B", "Berkshire Hathaway", "Financial"),
    ("XOM", "Exxon Mobil", "Energy"),
    ("CVX", "Chevron", "Energy"),
    ("COP", "ConocoPhillips", "Energy"),
    ("EOG", "EOG Resources", "Energy"),
    ("SLB", "Schlumberger", "Energy"),
    ("MPC", "Marathon Petroleum", "Energy"),
    ("VLO", "Valero Energy", "Energy"),
    ("PSX", "Phillips 66", "Energy"),
    ("WMT", "Walmart", "Consumer Staples"),
    ("HD", "Home Depot", "Consumer Discretionary"),
    ("MCD", "McDonald's", "Consumer Discretionary"),
    ("NKE", "Nike", "Consumer Discretionary"),
    ("SBUX", "Starbucks", "Consumer Discretionary"),
    ("DIS", "Walt Disney", "Communication Services"),
    ("F", "Ford Motor", "Consumer Discretionary"),
    ("GM", "General Motors", "Consumer Discretionary"),
    ("TGT", "Target", "Consumer Discretionary"),
    ("LOW", "Lowe's", "Consumer Discretionary"),
    ("KO", "Coca-Cola", "Consumer Staples"),
    ("PEP", "PepsiCo", "Consumer Staples"),
    ("PG", "Procter & Gamble", "Consumer Staples"),
    ("COST", "Costco Wholesale", "Consumer Staples"),
    ("GIS", "General Mills", "Consumer Staples"),
    ("K", "Kellogg", "Consumer Staples"),
    ("BA", "Boeing", "Industrials"),
    ("CAT", "Caterpillar", "Industrials"),
    ("GE", "General Electric", "Industrials"),
    ("LMT", "Lockheed Martin", "Industrials"),
    ("RTX", "Raytheon Technologies", "Industrials"),
    ("FDX", "FedEx", "Industrials"),
    ("UPS", "United Parcel Service", "Industrials"),
    ("UNP", "Union Pacific", "Industrials"),
    ("DAL", "Delta Air Lines", "Industrials"),
    ("UAL", "United Airlines", "Industrials"),
    ("AAL", "American Airlines", "Industrials"),
    ("LUV", "Southwest Airlines", "Industrials"),
    ("VZ", "Verizon Communications", "Communication Services"),
    ("T", "AT&T", "Communication Services"),
    ("TMUS", "T-Mobile US", "Communication Services"),
    ("CMCSA", "Comcast", "Communication Services"),
    ("CHTR", "Charter Communications", "Communication Services"),
    ("NEE", "NextEra Energy", "Utilities"),
    ("DUK", "Duke Energy", "Utilities"),
    ("SO", "Southern Company", "Utilities"),
    ("D", "Dominion Energy", "Utilities"),
    ("AMT", "American Tower", "Real Estate"),
    ("PLD", "Prologis", "Real Estate"),
    ("CCI", "Crown Castle", "Real Estate"),
    ("EQIX", "Equinix", "Real Estate"),
    ("SPG", "Simon Property Group", "Real Estate"),
    ("O", "Realty Income", "Real Estate"),
    ("BABA", "Alibaba", "International"),
    ("TCEHY", "Tencent", "International"),
    ("RIVN", "Rivian", "Consumer Discretionary"),
    ("LCID", "Lucid Group", "Consumer Discretionary"),
];

/// Per-sector keyword lists for sector inference
pub const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "tech",
            "software",
            "hardware",
            "semiconductor",
            "cloud",
            "saas",
            "cybersecurity",
            "artificial intelligence",
            "machine learning",
            "data analytics",
            "automation",
            "robotics",
            "blockchain",
        ],
    ),
    (
        "Healthcare",
        &[
            "pharmaceutical",
            "biotech",
            "medical",
            "healthcare",
            "drug",
            "medicine",
            "clinical",
            "medical device",
            "diagnostics",
            "vaccine",
            "therapy",
            "fda approval",
            "telemedicine",
        ],
    ),
    (
        "Financial",
        &[
            "bank",
            "financial",
            "insurance",
            "credit",
            "lending",
            "mortgage",
            "fintech",
            "payment",
            "brokerage",
            "asset management",
            "private equity",
            "hedge fund",
        ],
    ),
    (
        "Energy",
        &[
            "oil",
            "gas",
            "energy",
            "petroleum",
            "natural gas",
            "crude oil",
            "refining",
            "renewable energy",
            "solar",
            "wind",
            "clean energy",
            "drilling",
        ],
    ),
    (
        "Consumer Discretionary",
        &[
            "retail",
            "automotive",
            "restaurant",
            "hotel",
            "electric vehicle",
            "luxury",
            "e-commerce",
            "gaming",
        ],
    ),
    (
        "Consumer Staples",
        &[
            "food",
            "beverage",
            "grocery",
            "household products",
            "personal care",
            "packaged goods",
            "supermarket",
        ],
    ),
    (
        "Industrials",
        &[
            "aerospace",
            "defense",
            "machinery",
            "transportation",
            "logistics",
            "shipping",
            "manufacturing",
            "airline",
            "railway",
        ],
    ),
    (
        "Materials",
        &[
            "mining",
            "chemicals",
            "steel",
            "aluminum",
            "copper",
            "commodities",
            "raw materials",
        ],
    ),
    (
        "Communication Services",
        &[
            "telecom",
            "telecommunications",
            "wireless",
            "broadband",
            "social media",
            "streaming",
            "advertising",
        ],
    ),
    (
        "Utilities",
        &[
            "electric utility",
            "power generation",
            "water utility",
            "gas utility",
            "regulated utility",
            "grid",
        ],
    ),
    (
        "Real Estate",
        &[
            "reit",
            "real estate",
            "property",
            "commercial real estate",
            "housing",
            "data center",
        ],
    ),
];

/// Broad-sector phrases that flip a query into sector-analysis mode
pub const BROAD_SECTOR_PHRASES: &[(&str, &str)] = &[
    ("banking stocks", "Banking"),
    ("bank stocks", "Banking"),
    ("banking sector", "Banking"),
    ("banks", "Banking"),
    ("tech stocks", "Technology"),
    ("technology stocks", "Technology"),
    ("technology sector", "Technology"),
    ("tech sector", "Technology"),
    ("healthcare stocks", "Healthcare"),
    ("healthcare sector", "Healthcare"),
    ("pharma stocks", "Healthcare"),
    ("biotech stocks", "Healthcare"),
    ("energy stocks", "Energy"),
    ("energy sector", "Energy"),
    ("oil stocks", "Energy"),
    ("financial stocks", "Financial"),
    ("financial sector", "Financial"),
    ("utility stocks", "Utilities"),
    ("utilities sector", "Utilities"),
    ("real estate stocks", "Real Estate"),
    ("reit stocks", "Real Estate"),
    ("industrial stocks", "Industrials"),
    ("airline stocks", "Industrials"),
];

/// Representative tickers per sector, used to bound sector fan-out
pub const SECTOR_REPRESENTATIVES: &[(&str, &[&str])] = &[
    ("Banking", &["JPM", "BAC", "WFC", "C", "GS", "MS"]),
    ("Financial", &["JPM", "BAC", "WFC", "V", "MA", "GS"]),
    (
        "Technology",
        &["AAPL", "MSFT", "GOOGL", "NVDA", "META", "AMZN"],
    ),
    ("Healthcare", &["JNJ", "PFE", "UNH", "ABBV", "MRK", "LLY"]),
    ("Energy", &["XOM", "CVX", "COP", "EOG", "SLB"]),
    (
        "Consumer Discretionary",
        &["AMZN", "TSLA", "HD", "MCD", "NKE"],
    ),
    ("Consumer Staples", &["KO", "PG", "PEP", "WMT", "COST"]),
    ("Industrials", &["BA", "CAT", "GE", "UPS", "UNP"]),
    (
        "Communication Services",
        &["VZ", "T", "CMCSA", "NFLX", "DIS"],
    ),
    ("Utilities", &["NEE", "DUK", "SO", "D"]),
    ("Real Estate", &["AMT", "PLD", "CCI", "SPG", "O"]),
];

/// Hand-composed semantic search queries for sector-analysis mode
pub const SECTOR_SUMMARY_QUERIES: &[(&str, &str)] = &[
    (
        "Banking",
        "banking sector stocks performance JPMorgan Wells Fargo Goldman Sachs Bank of America Citigroup earnings financial results",
    ),
    (
        "Healthcare",
        "healthcare sector stocks performance Johnson Johnson Pfizer UnitedHealth Abbott medical pharmaceutical biotech earnings",
    ),
    (
        "Technology",
        "technology sector stocks performance Apple Microsoft Google Amazon Meta Tesla Nvidia tech earnings software hardware",
    ),
    (
        "Energy",
        "energy sector stocks performance ExxonMobil Chevron ConocoPhillips oil gas renewable earnings",
    ),
    (
        "Financial",
        "financial sector stocks performance banks insurance investment earnings financial services",
    ),
];

/// Sector-specific terms used by the relevance re-filter
pub const SECTOR_FILTER_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Banking",
        &[
            "bank",
            "banking",
            "jpm",
            "bac",
            "wfc",
            "citigroup",
            "goldman sachs",
            "wells fargo",
            "jpmorgan",
        ],
    ),
    (
        "Technology",
        &[
            "tech",
            "technology",
            "aapl",
            "msft",
            "googl",
            "apple",
            "microsoft",
            "google",
            "software",
            "hardware",
        ],
    ),
    (
        "Healthcare",
        &[
            "healthcare",
            "health",
            "medical",
            "pharmaceutical",
            "pharma",
            "biotech",
            "drug",
            "medicine",
            "clinical",
            "johnson",
            "pfizer",
            "unitedhealth",
        ],
    ),
    (
        "Energy",
        &["energy", "oil", "gas", "renewable", "petroleum", "drilling"],
    ),
    (
        "Financial",
        &["financial", "finance", "bank", "investment", "insurance"],
    ),
];

/// Curated allow-list of tradable tickers for the token scanner
pub const VALID_TICKERS: &[&str] = &[
    // Technology
    "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "TSLA", "META", "NVDA", "NFLX", "ADBE", "CRM",
    "ORCL", "INTC", "CSCO", "IBM", "AMD", "QCOM", "PYPL", "AVGO", "TXN", "INTU", "MU", "LRCX",
    "KLAC", "MRVL", "ADI", "AMAT", "SNPS", "CDNS", "FTNT",
    // Healthcare
    "JNJ", "PFE", "UNH", "MRK", "ABBV", "LLY", "BMY", "MRNA", "GILD", "AMGN", "BIIB", "REGN",
    "VRTX", "ISRG", "DHR", "TMO", "ABT", "SYK", "BSX", "MDT",
    // Financial
    "JPM", "BAC", "WFC", "C", "GS", "MS", "AXP", "V", "MA", "BRK.A", "BRK.B", "BLK", "SPGI",
    "AIG", "TFC", "USB", "PNC", "COF", "SCHW", "CME", "ICE",
    // Energy
    "XOM", "CVX", "COP", "EOG", "SLB", "MPC", "VLO", "PSX", "OXY", "BKR", "HAL", "DVN", "FANG",
    "MRO", "APA",
    // Consumer Discretionary
    "WMT", "HD", "MCD", "NKE", "SBUX", "DIS", "F", "GM", "TGT", "LOW", "TJX", "ORLY", "AZO",
    "YUM", "CMG", "MAR", "HLT", "ABNB", "BKNG", "EXPE", "RIVN", "LCID",
    // Consumer Staples
    "KO", "PEP", "PG", "COST", "GIS", "K", "HSY", "MDLZ", "KHC", "CL", "CLX", "CHD", "SJM",
    "CPB", "CAG", "TSN", "HRL", "MKC",
    // Industrials
    "BA", "CAT", "GE", "LMT", "RTX", "FDX", "UPS", "UNP", "CSX", "NSC", "MMM", "HON", "ETN",
    "EMR", "ITW", "PH", "CMI", "DE", "IR", "ROK", "DAL", "UAL", "AAL", "LUV",
    // Communication Services
    "VZ", "T", "TMUS", "CMCSA", "CHTR", "DISH", "LUMN", "SIRI", "SNAP", "PINS", "ROKU", "PARA",
    // Utilities
    "NEE", "DUK", "SO", "D", "AEP", "EXC", "XEL", "SRE", "PCG", "ED",
    // Real Estate
    "AMT", "PLD", "CCI", "EQIX", "DLR", "SBAC", "O", "SPG", "AVB", "EQR",
    // Materials
    "LIN", "APD", "ECL", "SHW", "DD", "DOW", "NEM", "FCX", "NUE", "VMC",
    // International / meme
    "TSM", "ASML", "BABA", "JD", "PDD", "BIDU", "NIO", "TCEHY", "GME", "AMC", "BB", "NOK",
    // ETFs
    "SPY", "QQQ", "IWM", "VTI", "VOO", "VEA", "VWO", "AGG", "BND", "GLD",
];

/// Uppercase tokens that look like tickers but never are
///
/// Kept disjoint from [`VALID_TICKERS`] by construction (see tests).
pub const TICKER_DENYLIST: &[&str] = &[
    "AI", "IT", "US", "EU", "UK", "CEO", "CFO", "IPO", "ETF", "SEC", "FDA", "API", "EPA", "THE",
    "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL", "CAN", "NEW", "ONE", "TWO", "GET", "SEE",
    "NOW", "WAY", "WHO", "DID", "ITS", "HER", "OLD", "HAS", "HIM", "HIS", "SHE", "HOW", "OUR",
    "CNBC", "CNN", "BBC", "WSJ", "NYSE", "USA",
];

/// Topic filter: at least one of these must appear for an article to count
/// as financial news at all
pub const FINANCIAL_KEYWORDS: &[&str] = &[
    "stock",
    "share",
    "earnings",
    "revenue",
    "market",
    "investment",
    "company",
    "financial",
    "business",
    "sector",
    "industry",
];

/// Financial-context terms that boost an article's relevance score
pub const FINANCIAL_CONTEXT_KEYWORDS: &[&str] = &[
    "earnings",
    "guidance",
    "analyst",
    "upgrade",
    "downgrade",
    "forecast",
    "dividend",
    "quarterly",
    "outlook",
    "valuation",
];

/// Financial news outlets passed to the keyword search provider
pub const NEWS_DOMAINS: &str =
    "reuters.com,bloomberg.com,cnbc.com,marketwatch.com,yahoo.com,wsj.com,barrons.com,seekingalpha.com,fool.com";

/// Representative tickers for a sector, capped
pub fn sector_representatives(sector: &str, cap: usize) -> Vec<String> {
    SECTOR_REPRESENTATIVES
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, tickers)| tickers.iter().take(cap).map(|t| (*t).to_string()).collect())
        .unwrap_or_default()
}

/// Display name for a ticker, if known
pub fn company_name(ticker: &str) -> Option<&'static str> {
    COMPANY_DIRECTORY
        .iter()
        .find(|(t, _, _)| *t == ticker)
        .map(|(_, name, _)| *name)
}

/// Sector classification for a ticker, if known
pub fn company_sector(ticker: &str) -> Option<&'static str> {
    COMPANY_DIRECTORY
        .iter()
        .find(|(t, _, _)| *t == ticker)
        .map(|(_, _, sector)| *sector)
}

/// Sector-mode semantic search query, if one is curated for the sector
pub fn sector_summary_query(sector: &str) -> Option<&'static str> {
    SECTOR_SUMMARY_QUERIES
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, query)| *query)
}

/// Filter keywords for a sector, if curated
pub fn sector_filter_keywords(sector: &str) -> &'static [&'static str] {
    SECTOR_FILTER_KEYWORDS
        .iter()
        .find(|(name, _)| *name == sector)
        .map_or(&[], |(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allow_and_deny_lists_disjoint() {
        let valid: HashSet<&str> = VALID_TICKERS.iter().copied().collect();
        for denied in TICKER_DENYLIST {
            assert!(!valid.contains(denied), "{denied} is in both lists");
        }
    }

    #[test]
    fn test_group_sectors_reference_known_groups() {
        let groups: HashSet<&str> = STOCK_GROUPS.iter().map(|(name, _)| *name).collect();
        for (group, _) in GROUP_SECTORS {
            assert!(groups.contains(group), "unknown group {group}");
        }
    }

    #[test]
    fn test_group_constituents_are_valid_tickers() {
        let valid: HashSet<&str> = VALID_TICKERS.iter().copied().collect();
        for (group, tickers) in STOCK_GROUPS {
            for ticker in *tickers {
                assert!(valid.contains(ticker), "{ticker} from {group} not in allow-list");
            }
        }
    }

    #[test]
    fn test_sector_representatives_capped() {
        let reps = sector_representatives("Banking", 5);
        assert_eq!(reps, vec!["JPM", "BAC", "WFC", "C", "GS"]);

        let reps = sector_representatives("Unknown", 5);
        assert!(reps.is_empty());
    }

    #[test]
    fn test_company_directory_lookup() {
        assert_eq!(company_name("AAPL"), Some("Apple"));
        assert_eq!(company_sector("JPM"), Some("Financial"));
        assert_eq!(company_name("ZZZZ"), None);
    }

    #[test]
    fn test_alias_tickers_have_directory_entries() {
        for (alias, ticker) in COMPANY_ALIASES {
            assert!(
                company_name(ticker).is_some(),
                "alias {alias} maps to {ticker} which has no directory entry"
            );
        }
    }

    #[test]
    fn test_sector_summary_query_lookup() {
        assert!(sector_summary_query("Banking").is_some());
        assert!(sector_summary_query("Materials").is_none());
    }
}
