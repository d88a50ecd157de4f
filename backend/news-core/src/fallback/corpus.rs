use crate::error::config::ConfigError;
use crate::field_normalizer::normalize_json;

use common::ErrorLocation;
use models::{NewsItem, NewsItemBuilder};

use std::panic::Location;
use std::path::Path;
use std::sync::Arc;

use log::info;
use once_cell::sync::Lazy;
use serde_json::Value;

/// (id, title, excerpt, category, image, published, source)
type CorpusRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const BUNDLED_ROWS: &[CorpusRow] = &[
    (
        "fallback-1",
        "삼성전자, 차세대 AI 반도체 양산 돌입",
        "삼성전자가 고대역폭 메모리 신제품의 양산을 시작하며 AI 반도체 시장 공략에 나섰다.",
        "경제",
        "/images/fallback/semiconductor.jpg",
        "2025-01-15T09:00:00Z",
        "연합뉴스",
    ),
    (
        "fallback-2",
        "정부, 생성형 AI 산업 육성 전략 발표",
        "과학기술정보통신부가 인공지능 스타트업 지원을 확대하는 방안을 내놓았다.",
        "IT/과학",
        "/images/fallback/policy.jpg",
        "2025-01-15T08:30:00Z",
        "뉴시스",
    ),
    (
        "fallback-3",
        "코스피, 외국인 매수세에 2,600선 회복",
        "반도체 대형주 강세에 힘입어 지수가 이틀 연속 상승했다.",
        "경제",
        "/images/fallback/kospi.jpg",
        "2025-01-15T07:45:00Z",
        "한국경제",
    ),
    (
        "fallback-4",
        "손흥민, 시즌 10호 골로 팀 승리 견인",
        "토트넘이 홈 경기에서 2-1 역전승을 거뒀다.",
        "스포츠",
        "/images/fallback/football.jpg",
        "2025-01-14T22:10:00Z",
        "스포츠서울",
    ),
    (
        "fallback-5",
        "프로야구 개막전, 역대 최다 관중 기록",
        "전국 5개 구장에 10만 명이 넘는 관중이 몰렸다.",
        "스포츠",
        "/images/fallback/baseball.jpg",
        "2025-01-14T19:00:00Z",
        "스포츠조선",
    ),
    (
        "fallback-6",
        "기상청, 이번 주말 전국 대체로 맑음",
        "낮 최고기온은 18도에서 24도로 평년보다 높겠다.",
        "생활",
        "/images/fallback/weather.jpg",
        "2025-01-14T17:20:00Z",
        "YTN",
    ),
    (
        "fallback-7",
        "전기차 배터리 재활용 시장 급성장",
        "완성차 업체들이 배터리 순환 경제 구축에 속도를 내고 있다.",
        "산업",
        "/images/fallback/battery.jpg",
        "2025-01-14T15:00:00Z",
        "매일경제",
    ),
    (
        "fallback-8",
        "OpenAI, 새 멀티모달 모델 공개",
        "텍스트와 이미지를 함께 이해하는 모델이 개발자에게 제공된다.",
        "IT/과학",
        "/images/fallback/model.jpg",
        "2025-01-14T11:40:00Z",
        "전자신문",
    ),
];

static BUNDLED_CORPUS: Lazy<Arc<[NewsItem]>> = Lazy::new(|| {
    BUNDLED_ROWS
        .iter()
        .map(|(id, title, excerpt, category, image, published, source)| {
            NewsItemBuilder::default()
                .with_id(*id)
                .with_title(*title)
                .with_excerpt(*excerpt)
                .with_category(*category)
                .with_image_url(*image)
                .with_published_at_rfc3339(published)
                .with_source(*source)
                .build()
                .expect("bundled fallback corpus is valid")
        })
        .collect::<Vec<_>>()
        .into()
});

/// The corpus compiled into the binary. Never empty.
pub fn bundled_corpus() -> Arc<[NewsItem]> {
    Arc::clone(&BUNDLED_CORPUS)
}

/// Load a replacement corpus from a JSON array of news items.
///
/// Upstream-style key aliases are accepted. An empty list is rejected: the
/// fallback path must always have something to show.
pub fn load_corpus_file(path: &Path) -> Result<Vec<NewsItem>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: Value = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        location: ErrorLocation::from(Location::caller()),
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let items: Vec<NewsItem> =
        serde_json::from_value(normalize_json(raw)).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if items.is_empty() {
        return Err(ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Fallback corpus {} is empty", path.display()),
        });
    }

    info!(
        "Loaded {} fallback news items from {}",
        items.len(),
        path.display()
    );
    Ok(items)
}
