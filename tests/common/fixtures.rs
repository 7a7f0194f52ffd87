//! Static listing corpora used across harnesses.
//!
//! Cards are shaped like the scraper's output: title first, company name,
//! requirements, location line last.

/// `(title, salary, card text)` triples the default pipeline keeps.
pub const CORPUS_CLEAN: &[(&str, &str, &str)] = &[
    (
        "数据分析师",
        "15-25K",
        "数据分析师\nABC科技公司\n3-5年经验，本科以上 Python SQL\n南京·江宁区",
    ),
    (
        "数据运营",
        "8-12K",
        "数据运营\n上海某某集团\n应届生可投 大专 Excel\n上海·浦东新区",
    ),
    (
        "商业分析",
        "20-30K·14薪",
        "商业分析\n杭州数据服务有限公司\n5年以上经验 硕士 Tableau PowerBI\n杭州",
    ),
    (
        "BI工程师",
        "12000-18000元/月",
        "BI工程师\n成都软件公司\n1-3年 学历不限 SQL Spark Hadoop\n工作地点 成都 高新区",
    ),
    (
        "算法分析师",
        "2140K",
        "算法分析师\n深圳科技公司\n3-5年 博士 Python Machine Learning\n深圳·南山区",
    ),
];

/// `(title, salary)` pairs that the default pipeline must drop, with the
/// drop counter they land in.
pub const CORPUS_DROPPED: &[(&str, Option<&str>, &str)] = &[
    ("双休岗位", Some("双休"), "salary_rejected"),
    ("无薪资", None, "salary_rejected"),
    ("超高薪", Some("150-300K"), "salary_rejected"),
    ("高管", Some("60-80K"), "out_of_band"),
    ("实习", Some("1-2K"), "out_of_band"),
];

/// A scraper CSV export with one short (malformed) row and one duplicate card.
pub const SCRAPER_CSV: &str = "title,salary,city,raw_text
数据分析师,15-25K,南京,\"数据分析师
ABC科技公司
3-5年 本科 Python
南京·江宁区\"
数据运营,2040K,上海,\"数据运营
上海某某集团
大专 Excel
上海\"
broken row,1-2K
数据分析师,15-25K,南京,\"数据分析师
ABC科技公司
3-5年 本科 Python
南京·江宁区\"
行政,双休,北京,\"行政
北京\"
";

/// The same listings as JSON lines, plus one undecodable line.
pub const SCRAPER_JSONL: &str = r#"{"title":"数据分析师","salary":"15-25K","city":"南京","raw_text":"数据分析师\nABC科技公司\n3-5年 本科 Python\n南京·江宁区"}
{"title":"数据运营","salary":"2040K","city":"上海","raw_text":"数据运营\n上海某某集团\n大专 Excel\n上海"}
{"title": 42}
{"title":"行政","salary":"双休","city":"北京","raw_text":"行政\n北京"}
"#;

/// Build `n` keepable listings with distinct titles and a salary spread.
pub fn synthetic_listings(n: usize) -> Vec<jobnorm_core::RawRecord> {
    const CITIES: &[&str] = &["南京", "上海", "北京", "深圳", "杭州"];
    const DEGREES: &[&str] = &["大专", "本科", "硕士", "博士", "学历不限"];
    (0..n)
        .map(|i| {
            let low = 5 + (i % 20);
            jobnorm_core::RawRecord {
                title: format!("listing-{i}"),
                salary_raw: Some(format!("{low}-{}K", low + 5)),
                raw_text: format!(
                    "listing-{i}\n某某科技公司\n{}-{}年 {} Python SQL\n{}·某区",
                    i % 5,
                    i % 5 + 2,
                    DEGREES[i % DEGREES.len()],
                    CITIES[i % CITIES.len()]
                ),
                city_raw: String::new(),
            }
        })
        .collect()
}
