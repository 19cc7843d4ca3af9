//! Integration tests for the content repositories.
//!
//! Run against a real PostgreSQL (`DATABASE_URL`); ignored by default.

use heritage_core::content::{
    Banner, FigureSection, HeritageFigure, Highlight, NewsArticle, Paragraphs, RecordMeta,
    SectionBody, WellnessTip,
};
use heritage_core::language::Language;
use heritage_db::error::StorageError;
use heritage_db::models::RecordFilter;
use heritage_db::repositories::{BannerRepo, HeritageFigureRepo, NewsRepo, WellnessTipRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn meta(slug: &str, language: Language, published: bool) -> RecordMeta {
    RecordMeta {
        url_slug: slug.to_string(),
        language,
        published,
        ..RecordMeta::default()
    }
}

fn new_tip(title: &str, slug: &str, language: Language, published: bool) -> WellnessTip {
    WellnessTip {
        meta: meta(slug, language, published),
        title: title.to_string(),
        ..WellnessTip::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_tip_crud_cycle(pool: PgPool) {
    let created = WellnessTipRepo::create(&pool, &new_tip("Test Tip", "test-tip", Language::Vi, false))
        .await
        .unwrap();
    assert!(created.meta.id > 0);
    assert!(created.meta.created_at.is_some());

    let mut update = created.clone();
    update.meta.published = true;
    update.description = "Updated".into();
    let updated = WellnessTipRepo::update(&pool, created.meta.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.meta.published);
    assert_eq!(updated.meta.created_at, created.meta.created_at);

    let removed = WellnessTipRepo::delete(&pool, created.meta.id, None).await.unwrap();
    assert_eq!(removed, [Language::Vi]);
    assert!(WellnessTipRepo::find_by_id(&pool, created.meta.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_find_all_filters_language_and_published(pool: PgPool) {
    WellnessTipRepo::create(&pool, &new_tip("A", "a", Language::Vi, true)).await.unwrap();
    WellnessTipRepo::create(&pool, &new_tip("B", "b", Language::Vi, false)).await.unwrap();
    WellnessTipRepo::create(&pool, &new_tip("A", "a", Language::En, true)).await.unwrap();

    let public_vi = WellnessTipRepo::find_all(&pool, &RecordFilter::public(Language::Vi))
        .await
        .unwrap();
    assert_eq!(public_vi.len(), 1);

    let admin_vi = WellnessTipRepo::find_all(&pool, &RecordFilter::admin(Language::Vi))
        .await
        .unwrap();
    assert_eq!(admin_vi.len(), 2);

    let everything = WellnessTipRepo::find_all(&pool, &RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_update_is_scoped_to_language(pool: PgPool) {
    let vi = WellnessTipRepo::create(&pool, &new_tip("A", "a", Language::Vi, true))
        .await
        .unwrap();
    let mut as_english = vi.clone();
    as_english.meta.language = Language::En;
    let result = WellnessTipRepo::update(&pool, vi.meta.id, &as_english).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_duplicate_slug_maps_to_storage_error(pool: PgPool) {
    WellnessTipRepo::create(&pool, &new_tip("A", "same", Language::Vi, true))
        .await
        .unwrap();
    let err = WellnessTipRepo::create(&pool, &new_tip("B", "same", Language::Vi, true))
        .await
        .unwrap_err();
    assert!(matches!(
        StorageError::from(err),
        StorageError::DuplicateSlug { .. }
    ));

    // Same slug in the other language partition is fine.
    WellnessTipRepo::create(&pool, &new_tip("B", "same", Language::En, true))
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_figure_structured_fields_round_trip(pool: PgPool) {
    let figure = HeritageFigure {
        meta: meta("tran-van-khe", Language::Vi, true),
        full_name: "Trần Văn Khê".into(),
        summary: vec!["Một".into(), "Hai".into()],
        sections: vec![
            FigureSection {
                title: "Tiểu sử".into(),
                body: SectionBody::Text {
                    content: "Sinh năm 1921".into(),
                },
            },
            FigureSection {
                title: "Giải thưởng".into(),
                body: SectionBody::List {
                    items: vec!["A".into(), "B".into()],
                },
            },
        ],
        highlights: vec![Highlight {
            question: "Q".into(),
            answer: Paragraphs::from_text("A\nB\nC"),
        }],
        ..HeritageFigure::default()
    };

    let created = HeritageFigureRepo::create(&pool, &figure).await.unwrap();
    let loaded = HeritageFigureRepo::find_by_slug(&pool, Language::Vi, "tran-van-khe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.meta.id, created.meta.id);
    assert_eq!(loaded.summary, figure.summary);
    assert_eq!(loaded.sections, figure.sections);
    assert_eq!(loaded.highlights, figure.highlights);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_news_images_round_trip(pool: PgPool) {
    let article = NewsArticle {
        meta: meta("le-hoi", Language::Vi, true),
        title: "Lễ hội".into(),
        images: vec!["/a.jpg".into(), "/b.jpg".into()],
        ..NewsArticle::default()
    };
    let created = NewsRepo::create(&pool, &article).await.unwrap();
    assert_eq!(created.images, article.images);
    assert_eq!(created.author, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn test_banners_order_by_display_order(pool: PgPool) {
    for (slug, order) in [("c", 3), ("a", 1), ("b", 2)] {
        let banner = Banner {
            meta: meta(slug, Language::Vi, true),
            title: slug.into(),
            display_order: order,
            ..Banner::default()
        };
        BannerRepo::create(&pool, &banner).await.unwrap();
    }
    let banners = BannerRepo::find_all(&pool, &RecordFilter::public(Language::Vi))
        .await
        .unwrap();
    let orders: Vec<i32> = banners.iter().map(|b| b.display_order).collect();
    assert_eq!(orders, [1, 2, 3]);
}
