//! Integration tests for batch export from save files to MAL XML

use chrono::NaiveDate;
use malxport::adapters::{SaveFile, SaveFileFormat};
use malxport::core::compile::{CompileOptions, UnmappedPolicy};
use malxport::core::export::{BatchExporter, UserIdentity};
use malxport::domain::{CanonicalEntry, CompileError, EntryStatus, KindGroup, MediaKind};
use test_case::test_case;

const SAVE_FILE: &str = r#"{
  "header": {"version": 1, "user_details": {"id": 99, "name": "listkeeper"}},
  "data": [
    {
      "id": {"type": "int", "value": "1"},
      "title": {"transliterated": "Cowboy Bebop", "english": "Cowboy Bebop"},
      "type": "animation",
      "subtype": "tv",
      "status": "completed",
      "progress": {"episode": 26},
      "upstream_progress": {"episode": 26},
      "date": {"start": "2020-01-01", "finish": "2020-02-14"},
      "score": {"value": 9},
      "tags": ["space", "jazz"],
      "mappings": {"myanimelist": 1}
    },
    {
      "id": {"type": "int", "value": "20"},
      "title": {"transliterated": "Naruto"},
      "type": "animation",
      "status": "watching",
      "progress": {"episode": 50},
      "mappings": {"myanimelist": 20}
    },
    {
      "id": {"type": "int", "value": "5114"},
      "title": {"transliterated": "Hagane no Renkinjutsushi: Fullmetal Alchemist"},
      "type": "animation",
      "status": "plan_to_watch"
    },
    {
      "id": {"type": "int", "value": "2"},
      "title": {"transliterated": "Berserk"},
      "type": "comic",
      "status": "rereading",
      "progress": {"chapter": 120, "volume": 12},
      "upstream_progress": {"chapter": 0},
      "priority": "very_high",
      "mappings": {"myanimelist": 2}
    }
  ]
}"#;

fn save() -> SaveFile {
    SaveFile::parse(SAVE_FILE, SaveFileFormat::Json).unwrap()
}

fn entry(kind: MediaKind, status: EntryStatus) -> CanonicalEntry {
    CanonicalEntry::builder()
        .kind(kind)
        .status(status)
        .transliterated_title("Title")
        .mapping("myanimelist", 1)
        .build()
        .unwrap()
}

#[test]
fn test_full_save_file_is_rejected_as_mixed() {
    let save = save();
    let result = BatchExporter::default().compile(&save.data);
    assert_eq!(
        result,
        Err(CompileError::HeterogeneousBatch {
            index: 3,
            expected: KindGroup::Video,
            found: KindGroup::Text,
        })
    );
}

#[test]
fn test_split_groups_compile_independently() {
    let save = save();
    let grouped = save.split_by_group();
    let exporter = BatchExporter::default().with_user(save.user_identity());

    let anime = exporter.export(grouped.group(KindGroup::Video)).unwrap();
    assert_eq!(anime.summary.records, 3);
    assert_eq!(anime.document.matches("<anime>").count(), 3);
    assert!(anime.document.contains("<user_id>99</user_id>"));
    assert!(anime
        .document
        .contains("<user_name><![CDATA[listkeeper]]></user_name>"));
    assert!(anime
        .document
        .contains("<my_tags><![CDATA[space,jazz]]></my_tags>"));
    assert!(anime.document.contains("<series_type>TV</series_type>"));
    assert!(anime.document.contains("<my_finish_date>2020-02-14</my_finish_date>"));

    let manga = exporter.export(grouped.group(KindGroup::Text)).unwrap();
    assert_eq!(manga.summary.records, 1);
    assert!(manga.document.contains("<my_status>Completed</my_status>"));
    assert!(manga.document.contains("<my_rereading>YES</my_rereading>"));
    assert!(manga.document.contains("<my_priority>High</my_priority>"));
    assert!(manga.document.contains("<manga_chapters></manga_chapters>"));
    assert!(manga.document.contains("<my_read_chapters>120</my_read_chapters>"));
    assert!(manga.document.contains("<user_total_completed>1</user_total_completed>"));
}

#[test]
fn test_header_counts_for_three_video_entries() {
    let batch = [
        entry(MediaKind::Animation, EntryStatus::Current),
        entry(MediaKind::Animation, EntryStatus::Completed),
        entry(MediaKind::Animation, EntryStatus::Planned),
    ];
    let xml = BatchExporter::default().compile(&batch).unwrap();

    for expected in [
        "<user_total_anime>3</user_total_anime>",
        "<user_total_watching>1</user_total_watching>",
        "<user_total_completed>1</user_total_completed>",
        "<user_total_onhold>0</user_total_onhold>",
        "<user_total_dropped>0</user_total_dropped>",
        "<user_total_plantowatch>1</user_total_plantowatch>",
    ] {
        assert!(xml.contains(expected), "missing {expected}");
    }
}

#[test]
fn test_absent_score_and_dates() {
    let xml = BatchExporter::default()
        .compile(&[entry(MediaKind::Animation, EntryStatus::Current)])
        .unwrap();
    assert!(xml.contains("<my_score>0</my_score>"));
    assert!(xml.contains("<my_start_date>0000-00-00</my_start_date>"));
    assert!(xml.contains("<my_finish_date>0000-00-00</my_finish_date>"));
    assert!(!xml.contains("<my_start_date></my_start_date>"));
}

#[test]
fn test_present_dates_render_as_given() {
    let started = NaiveDate::from_ymd_opt(2019, 7, 3).unwrap();
    let batch = [CanonicalEntry::builder()
        .kind(MediaKind::Book)
        .status(EntryStatus::Current)
        .started(started)
        .build()
        .unwrap()];
    let xml = BatchExporter::default().compile(&batch).unwrap();
    assert!(xml.contains("<my_start_date>2019-07-03</my_start_date>"));
    assert!(xml.contains("<my_finish_date>0000-00-00</my_finish_date>"));
}

#[test_case(MediaKind::Animation, "<my_rewatching>1</my_rewatching>", "<my_discuss>0</my_discuss>" ; "video flags are digits")]
#[test_case(MediaKind::Comic, "<my_rereading>YES</my_rereading>", "<my_discuss>NO</my_discuss>" ; "text flags are yes no")]
fn test_repeating_flag_spelling(kind: MediaKind, repeating: &str, discuss: &str) {
    let xml = BatchExporter::default()
        .compile(&[entry(kind, EntryStatus::Repeating)])
        .unwrap();
    assert!(xml.contains(repeating), "{xml}");
    assert!(xml.contains(discuss), "{xml}");
}

#[test_case(MediaKind::Animation, "<my_rewatching>0</my_rewatching>" ; "video not repeating")]
#[test_case(MediaKind::Book, "<my_rereading>NO</my_rereading>" ; "text not repeating")]
fn test_not_repeating_flag_spelling(kind: MediaKind, expected: &str) {
    let xml = BatchExporter::default()
        .compile(&[entry(kind, EntryStatus::Dropped)])
        .unwrap();
    assert!(xml.contains(expected), "{xml}");
}

#[test]
fn test_bad_entry_rejects_whole_batch() {
    let mut batch: Vec<CanonicalEntry> = (0..5)
        .map(|_| entry(MediaKind::Animation, EntryStatus::Current))
        .collect();
    batch.push(
        CanonicalEntry::builder()
            .kind(MediaKind::Animation)
            .status(EntryStatus::Current)
            .storage_medium("Retail Manga")
            .build()
            .unwrap(),
    );

    let result = BatchExporter::default().export(&batch);
    assert!(matches!(
        result,
        Err(CompileError::StorageMediumKindMismatch {
            expected: KindGroup::Video,
            ..
        })
    ));
}

#[test]
fn test_record_count_matches_batch() {
    for size in [1usize, 2, 10] {
        let batch: Vec<CanonicalEntry> = (0..size)
            .map(|_| entry(MediaKind::Comic, EntryStatus::OnHold))
            .collect();
        let xml = BatchExporter::default().compile(&batch).unwrap();
        assert_eq!(xml.matches("<manga>").count(), size);
        assert_eq!(xml.matches("<myinfo>").count(), 1);
    }
}

#[test]
fn test_free_text_is_escaped_only_outside_cdata() {
    let batch = [CanonicalEntry::builder()
        .kind(MediaKind::Animation)
        .status(EntryStatus::Completed)
        .transliterated_title("Tom & Jerry <3")
        .notes("line one\nline two")
        .build()
        .unwrap()];
    let xml = BatchExporter::default().compile(&batch).unwrap();
    assert!(xml.contains("<series_title><![CDATA[Tom & Jerry <3]]></series_title>"));
    assert!(xml.contains("<my_comments><![CDATA[line one\nline two]]></my_comments>"));
}

#[test]
fn test_comment_policy_keeps_unmapped_records_out_of_imports() {
    let exporter = BatchExporter::new(CompileOptions {
        update_on_import: false,
        unmapped: UnmappedPolicy::Comment,
    })
    .with_user(UserIdentity::default());

    let unmapped = CanonicalEntry::builder()
        .kind(MediaKind::Animation)
        .status(EntryStatus::Planned)
        .transliterated_title("Unlisted")
        .build()
        .unwrap();
    let batch = [entry(MediaKind::Animation, EntryStatus::Planned), unmapped];

    let compiled = exporter.export(&batch).unwrap();
    assert_eq!(compiled.summary.unmapped, 1);
    assert_eq!(compiled.document.matches("<!-- <anime>").count(), 1);
    assert!(compiled
        .document
        .contains("<update_on_import>0</update_on_import>"));
    assert!(compiled
        .document
        .contains("<user_total_plantowatch>2</user_total_plantowatch>"));
}

#[tokio::test]
async fn test_concurrent_batches_are_independent() {
    let exporter = BatchExporter::default();
    let video: Vec<_> = (0..50)
        .map(|_| entry(MediaKind::Animation, EntryStatus::Current))
        .collect();
    let text: Vec<_> = (0..50)
        .map(|_| entry(MediaKind::Book, EntryStatus::Completed))
        .collect();

    let a = {
        let exporter = exporter.clone();
        tokio::task::spawn_blocking(move || exporter.compile(&video))
    };
    let b = {
        let exporter = exporter.clone();
        tokio::task::spawn_blocking(move || exporter.compile(&text))
    };

    let anime = a.await.unwrap().unwrap();
    let manga = b.await.unwrap().unwrap();
    assert!(anime.contains("<user_total_watching>50</user_total_watching>"));
    assert!(manga.contains("<user_total_completed>50</user_total_completed>"));
}
