/// Source tags stamped on every record. The provincial tag is built per
/// province from `PROVINCIAL_TAG_SUFFIX`.
pub const WORLD_HERITAGE_SOURCE: &str = "世界遗产";
pub const SCENIC_5A_SOURCE: &str = "5A级景区";
pub const MOUNTAIN_SOURCE: &str = "名山";
pub const ANCIENT_TOWN_SOURCE: &str = "历史文化名镇";
pub const PROVINCIAL_TAG_SUFFIX: &str = "景点";

pub const DEFAULT_COUNTRY: &str = "中国";

// Extractor ids (used by `--sources`)
pub const WORLD_HERITAGE_ID: &str = "world_heritage";
pub const SCENIC_5A_ID: &str = "scenic_5a";
pub const MOUNTAINS_ID: &str = "mountains";
pub const ANCIENT_TOWNS_ID: &str = "ancient_towns";
pub const PROVINCIAL_ID: &str = "provincial";

/// Fixed orchestration order. Earlier extractors win name collisions.
pub const EXTRACTOR_ORDER: [&str; 5] = [
    WORLD_HERITAGE_ID,
    SCENIC_5A_ID,
    MOUNTAINS_ID,
    ANCIENT_TOWNS_ID,
    PROVINCIAL_ID,
];

// Wikipedia page titles
pub const WORLD_HERITAGE_PAGE: &str = "中国世界遗产列表";
pub const SCENIC_5A_PAGE: &str = "国家5A级旅游景区";
pub const ANCIENT_TOWN_PAGE: &str = "中国历史文化名镇";
pub const MOUNTAIN_LIST_PAGES: [&str; 3] = ["中国五岳", "中国四大佛教名山", "中国四大道教名山"];
pub const PROVINCE_TOURISM_SUFFIX: &str = "旅游";

pub const PROVINCES: [&str; 34] = [
    "北京市",
    "上海市",
    "天津市",
    "重庆市",
    "河北省",
    "山西省",
    "辽宁省",
    "吉林省",
    "黑龙江省",
    "江苏省",
    "浙江省",
    "安徽省",
    "福建省",
    "江西省",
    "山东省",
    "河南省",
    "湖北省",
    "湖南省",
    "广东省",
    "海南省",
    "四川省",
    "贵州省",
    "云南省",
    "陕西省",
    "甘肃省",
    "青海省",
    "内蒙古自治区",
    "广西壮族自治区",
    "西藏自治区",
    "宁夏回族自治区",
    "新疆维吾尔自治区",
    "香港特别行政区",
    "澳门特别行政区",
    "台湾省",
];

/// Section headings on provincial pages that introduce attraction lists.
pub const SECTION_KEYWORDS: [&str; 9] = [
    "旅游", "景点", "名胜", "古迹", "风景", "遗产", "公园", "寺庙", "博物馆",
];

/// Link texts that are wiki chrome rather than attraction names.
pub const PROVINCIAL_EXCLUDED_PREFIXES: [&str; 3] = ["编辑", "参考", "维基"];
pub const MOUNTAIN_EXCLUDED_PREFIXES: [&str; 2] = ["编辑", "参考"];

pub const MOUNTAIN_CHAR: char = '山';
pub const MOUNTAIN_NAME_MAX_CHARS: usize = 10;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_BASE_URL: &str = "https://zh.wikipedia.org/wiki/";
pub const DEFAULT_OUTPUT_PATH: &str = "china_attractions.json";
pub const DEFAULT_CONFIG_PATH: &str = "crawler.toml";

/// Build the provincial source tag, e.g. `浙江省景点`.
pub fn provincial_source(province: &str) -> String {
    format!("{province}{PROVINCIAL_TAG_SUFFIX}")
}

/// Get all supported extractor ids in orchestration order
pub fn get_supported_extractors() -> Vec<&'static str> {
    EXTRACTOR_ORDER.to_vec()
}
