//! Known top-level domains for the strict grammars
//!
//! Country-code TLDs (ISO 3166-1 alpha-2 plus the delegated exceptions) and
//! the generic TLDs seen in real-world mail and web traffic. Any `xn--` TLD
//! is treated as known since the IDN ccTLD list changes independently.

/// Sorted for binary search.
const KNOWN_TLDS: &[&str] = &[
    "ac", "academy", "ad", "ae", "aero", "af", "ag", "agency", "ai", "al", "am", "amazon", "ao",
    "app", "aq", "ar", "arpa", "art", "as", "asia", "at", "au", "audio", "aw", "ax", "az", "ba",
    "band", "bank", "bar", "bb", "bd", "be", "berlin", "best", "bf", "bg", "bh", "bi", "bike",
    "biz", "bj", "blog", "bm", "bn", "bo", "book", "br", "bs", "bt", "bv", "bw", "by", "bz", "ca",
    "cab", "cafe", "camp", "capital", "care", "careers", "casa", "cat", "cc", "cd", "center", "cf",
    "cg", "ch", "chat", "ci", "city", "ck", "cl", "click", "cloud", "club", "cm", "cn", "co",
    "codes", "com", "community", "company", "consulting", "coop", "cr", "cu", "cv", "cw", "cx",
    "cy", "cz", "de", "design", "dev", "digital", "direct", "dj", "dk", "dm", "do", "dz", "ec",
    "edu", "education", "ee", "eg", "email", "energy", "engineering", "er", "es", "et", "eu",
    "events", "expert", "fi", "finance", "fj", "fk", "fm", "fo", "foundation", "fr", "fun", "ga",
    "gallery", "games", "garden", "gb", "gd", "ge", "gf", "gg", "gh", "gi", "gl", "global", "gm",
    "gn", "goog", "google", "gov", "gp", "gq", "gr", "group", "gs", "gt", "gu", "guide", "guru",
    "gw", "gy", "health", "hk", "hm", "hn", "host", "house", "hr", "ht", "hu", "id", "ie", "il",
    "im", "in", "info", "ink", "int", "io", "iq", "ir", "is", "it", "je", "jm", "jo", "jobs", "jp",
    "ke", "kg", "kh", "ki", "kim", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la", "land", "lb",
    "lc", "legal", "li", "life", "link", "live", "lk", "london", "lr", "ls", "lt", "ltd", "lu",
    "lv", "ly", "ma", "mc", "md", "me", "media", "mf", "mg", "mh", "mil", "mk", "ml", "mm", "mn",
    "mo", "mobi", "moe", "money", "mp", "mq", "mr", "ms", "mt", "mu", "museum", "mv", "mw", "mx",
    "my", "mz", "na", "name", "nc", "ne", "net", "network", "news", "nf", "ng", "ni", "ninja",
    "nl", "no", "np", "nr", "nu", "nyc", "nz", "om", "one", "online", "org", "pa", "page", "paris",
    "partners", "pe", "pf", "pg", "ph", "photo", "photography", "pk", "pl", "plus", "pm", "pn",
    "post", "pr", "press", "pro", "ps", "pt", "pub", "pw", "py", "qa", "re", "red", "rest", "ro",
    "rocks", "rs", "ru", "run", "rw", "sa", "sb", "sc", "school", "sd", "se", "services", "sg",
    "sh", "shop", "si", "site", "sj", "sk", "sl", "sm", "sn", "so", "social", "software",
    "solutions", "space", "sr", "ss", "st", "store", "studio", "su", "sv", "sx", "sy", "systems",
    "sz", "tc", "td", "team", "tech", "tel", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn", "to",
    "today", "tokyo", "tools", "top", "tr", "travel", "tt", "tv", "tw", "tz", "ua", "ug", "uk",
    "um", "university", "us", "uy", "uz", "va", "vc", "ve", "vg", "vi", "video", "vip", "vn", "vu",
    "wales", "wf", "wiki", "work", "works", "world", "ws", "xxx", "xyz", "ye", "yt", "za", "zm",
    "zone", "zw",
];

/// Whether `tld` (any case) is a known top-level domain.
pub(crate) fn is_known(tld: &str) -> bool {
    if tld.len() > 4 && tld.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("xn--")) {
        return true;
    }
    let lowered = tld.to_ascii_lowercase();
    KNOWN_TLDS.binary_search(&lowered.as_str()).is_ok()
}
