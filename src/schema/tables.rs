//! Template definitions for every provisioned table, with their sample rows

use super::types::*;
use super::types::SampleValue::{Number, People, Relations, Text};

const ME: &[PersonRef] = &[PersonRef::DefaultPerson];
const NEXT: &[RelationRef] = &[RelationRef::NextRelated];

// =============================================================================
// Request forms
// =============================================================================

pub static EXPENSE: TableTemplate = TableTemplate {
    title: "📥 지출결의서",
    icon: "📥",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("항목명", ColumnKind::Text),
        Column::new("금액", ColumnKind::Number { format: "number" }),
        Column::new("계정과목", ColumnKind::Select),
        Column::new("요청일", ColumnKind::Date),
        Column::new("요청월", ColumnKind::Select),
        Column::new("요청자", ColumnKind::People),
        Column::new("상태", ColumnKind::Status),
        Column::new("첨부파일", ColumnKind::Files),
    ],
    status: StatusOptions::DEFAULT,
    related_source: None,
    calendar: None,
    samples: &[
        &[("제목", Text("지출1")), ("항목명", Text("노트북")), ("금액", Number(1_500_000.0)), ("계정과목", Text("소모품비")), ("요청일", Text("2024-05-01")), ("요청월", Text("2024-05")), ("요청자", People(ME)), ("상태", Text("미처리"))],
        &[("제목", Text("지출2")), ("항목명", Text("모니터")), ("금액", Number(300_000.0)), ("계정과목", Text("기타")), ("요청일", Text("2024-05-05")), ("요청월", Text("2024-05")), ("요청자", People(ME)), ("상태", Text("승인됨"))],
        &[("제목", Text("지출3")), ("항목명", Text("키보드")), ("금액", Number(100_000.0)), ("계정과목", Text("소모품비")), ("요청일", Text("2024-05-10")), ("요청월", Text("2024-05")), ("요청자", People(ME)), ("상태", Text("미처리"))],
        &[("제목", Text("지출4")), ("항목명", Text("마우스")), ("금액", Number(50_000.0)), ("계정과목", Text("기타")), ("요청일", Text("2024-05-15")), ("요청월", Text("2024-05")), ("요청자", People(ME)), ("상태", Text("승인됨"))],
        &[("제목", Text("지출5")), ("항목명", Text("책상")), ("금액", Number(250_000.0)), ("계정과목", Text("복리후생")), ("요청일", Text("2024-05-20")), ("요청월", Text("2024-05")), ("요청자", People(ME)), ("상태", Text("미처리"))],
    ],
};

pub static TRIP_REQUEST: TableTemplate = TableTemplate {
    title: "✈️ 출장 요청서",
    icon: "✈️",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("출장자", ColumnKind::People),
        Column::new("출장지", ColumnKind::Text),
        Column::new("출장기간", ColumnKind::Date),
        Column::new("출장목적", ColumnKind::Text),
        Column::new("상태", ColumnKind::Status),
    ],
    status: StatusOptions::DEFAULT,
    related_source: None,
    calendar: None,
    samples: &[
        &[("제목", Text("출장1")), ("출장자", People(ME)), ("출장지", Text("서울")), ("출장기간", Text("2024-06-01/2024-06-05")), ("출장목적", Text("회의")), ("상태", Text("진행중"))],
        &[("제목", Text("출장2")), ("출장자", People(ME)), ("출장지", Text("부산")), ("출장기간", Text("2024-06-10/2024-06-12")), ("출장목적", Text("교육")), ("상태", Text("승인됨"))],
        &[("제목", Text("출장3")), ("출장자", People(ME)), ("출장지", Text("대전")), ("출장기간", Text("2024-06-15/2024-06-18")), ("출장목적", Text("출장")), ("상태", Text("진행중"))],
        &[("제목", Text("출장4")), ("출장자", People(ME)), ("출장지", Text("인천")), ("출장기간", Text("2024-06-20/2024-06-22")), ("출장목적", Text("미팅")), ("상태", Text("미처리"))],
        &[("제목", Text("출장5")), ("출장자", People(ME)), ("출장지", Text("광주")), ("출장기간", Text("2024-06-25/2024-06-27")), ("출장목적", Text("회의")), ("상태", Text("진행중"))],
    ],
};

pub static LEAVE_RECORD: TableTemplate = TableTemplate {
    title: "🌴 휴가 기록서",
    icon: "🌴",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("휴가자", ColumnKind::People),
        Column::new("휴가시작", ColumnKind::Date),
        Column::new("휴가종료", ColumnKind::Date),
        Column::new("휴가유형", ColumnKind::Select),
        Column::new("상태", ColumnKind::Status),
    ],
    status: StatusOptions::DEFAULT,
    related_source: None,
    calendar: None,
    samples: &[
        &[("제목", Text("휴가1")), ("휴가자", People(ME)), ("휴가시작", Text("2024-07-01")), ("휴가종료", Text("2024-07-05")), ("휴가유형", Text("연차")), ("상태", Text("승인됨"))],
        &[("제목", Text("휴가2")), ("휴가자", People(ME)), ("휴가시작", Text("2024-07-10")), ("휴가종료", Text("2024-07-12")), ("휴가유형", Text("병가")), ("상태", Text("미처리"))],
        &[("제목", Text("휴가3")), ("휴가자", People(ME)), ("휴가시작", Text("2024-07-15")), ("휴가종료", Text("2024-07-18")), ("휴가유형", Text("연차")), ("상태", Text("승인됨"))],
        &[("제목", Text("휴가4")), ("휴가자", People(ME)), ("휴가시작", Text("2024-07-20")), ("휴가종료", Text("2024-07-22")), ("휴가유형", Text("병가")), ("상태", Text("미처리"))],
        &[("제목", Text("휴가5")), ("휴가자", People(ME)), ("휴가시작", Text("2024-07-25")), ("휴가종료", Text("2024-07-28")), ("휴가유형", Text("연차")), ("상태", Text("승인됨"))],
    ],
};

pub static TRAINING_REQUEST: TableTemplate = TableTemplate {
    title: "📝 교육 수강 신청서",
    icon: "📝",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("수강생", ColumnKind::People),
        Column::new("교육명", ColumnKind::Text),
        Column::new("교육일", ColumnKind::Date),
        Column::new("상태", ColumnKind::Status),
    ],
    status: StatusOptions::DEFAULT,
    related_source: None,
    calendar: None,
    samples: &[
        &[("제목", Text("교육1")), ("수강생", People(ME)), ("교육명", Text("파이썬 기초")), ("교육일", Text("2024-08-01")), ("상태", Text("승인됨"))],
        &[("제목", Text("교육2")), ("수강생", People(ME)), ("교육명", Text("데이터 분석")), ("교육일", Text("2024-08-05")), ("상태", Text("미처리"))],
        &[("제목", Text("교육3")), ("수강생", People(ME)), ("교육명", Text("머신러닝")), ("교육일", Text("2024-08-10")), ("상태", Text("승인됨"))],
        &[("제목", Text("교육4")), ("수강생", People(ME)), ("교육명", Text("인공지능")), ("교육일", Text("2024-08-15")), ("상태", Text("미처리"))],
        &[("제목", Text("교육5")), ("수강생", People(ME)), ("교육명", Text("빅데이터")), ("교육일", Text("2024-08-20")), ("상태", Text("승인됨"))],
    ],
};

// =============================================================================
// Directory and calendar
// =============================================================================

pub static STAFF: TableTemplate = TableTemplate {
    title: "👥 직원목록",
    icon: "👥",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("이름", ColumnKind::Text),
        Column::new("부서", ColumnKind::Select),
        Column::new("직급", ColumnKind::Select),
        Column::new("상태", ColumnKind::Status),
    ],
    status: StatusOptions {
        names: &["재직", "휴직", "퇴사"],
        default: "재직",
    },
    related_source: None,
    calendar: None,
    samples: &[
        &[("제목", Text("직원1")), ("이름", Text("홍길동")), ("부서", Text("개발팀")), ("직급", Text("사원")), ("상태", Text("재직"))],
        &[("제목", Text("직원2")), ("이름", Text("김철수")), ("부서", Text("영업팀")), ("직급", Text("대리")), ("상태", Text("재직"))],
        &[("제목", Text("직원3")), ("이름", Text("이영희")), ("부서", Text("기획팀")), ("직급", Text("과장")), ("상태", Text("퇴사"))],
        &[("제목", Text("직원4")), ("이름", Text("박민수")), ("부서", Text("개발팀")), ("직급", Text("대리")), ("상태", Text("재직"))],
        &[("제목", Text("직원5")), ("이름", Text("최지민")), ("부서", Text("기획팀")), ("직급", Text("사원")), ("상태", Text("재직"))],
    ],
};

pub static COMPANY_CALENDAR: TableTemplate = TableTemplate {
    title: "📅 회사 일정 캘린더",
    icon: "📅",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::new("시작일", ColumnKind::Date),
        Column::new("종료일", ColumnKind::Date),
        Column::new("상태", ColumnKind::Status),
        Column::new("설명", ColumnKind::Text),
    ],
    status: StatusOptions {
        names: &["예정", "진행중", "완료"],
        default: "예정",
    },
    related_source: None,
    calendar: Some(CalendarMapping {
        start: "시작일",
        end: "종료일",
        description: "설명",
    }),
    samples: &[
        &[("제목", Text("회의1")), ("시작일", Text("2024-09-01")), ("종료일", Text("2024-09-01")), ("상태", Text("예정")), ("설명", Text("월간 회의"))],
        &[("제목", Text("교육1")), ("시작일", Text("2024-09-05")), ("종료일", Text("2024-09-05")), ("상태", Text("진행중")), ("설명", Text("신규 교육"))],
        &[("제목", Text("회의2")), ("시작일", Text("2024-09-10")), ("종료일", Text("2024-09-10")), ("상태", Text("예정")), ("설명", Text("전사 회의"))],
        &[("제목", Text("휴가")), ("시작일", Text("2024-09-15")), ("종료일", Text("2024-09-20")), ("상태", Text("진행중")), ("설명", Text("휴가 기간"))],
        &[("제목", Text("워크샵")), ("시작일", Text("2024-09-25")), ("종료일", Text("2024-09-27")), ("상태", Text("예정")), ("설명", Text("팀 워크샵"))],
    ],
};

// =============================================================================
// Tables with relations (resolved after creation)
// =============================================================================

pub static EVIDENCE: TableTemplate = TableTemplate {
    title: "📁 휴가 및 출장 증빙서류",
    icon: "📁",
    columns: &[
        Column::new("제목", ColumnKind::Title),
        Column::relation("관련 요청", "✈️ 출장 요청서"),
        Column::new("첨부파일", ColumnKind::Files),
        Column::new("상태", ColumnKind::Status),
    ],
    status: StatusOptions::DEFAULT,
    related_source: Some("✈️ 출장 요청서"),
    calendar: None,
    samples: &[
        &[("제목", Text("증빙1")), ("관련 요청", Relations(NEXT)), ("첨부파일", SampleValue::Files(&[FileRef { name: "영수증1.pdf", url: "https://example.com/receipts/1.pdf" }])), ("상태", Text("승인됨"))],
        &[("제목", Text("증빙2")), ("관련 요청", Relations(NEXT)), ("첨부파일", SampleValue::Files(&[FileRef { name: "영수증2.pdf", url: "https://example.com/receipts/2.pdf" }])), ("상태", Text("미처리"))],
        &[("제목", Text("증빙3")), ("관련 요청", Relations(NEXT)), ("상태", Text("진행중"))],
    ],
};

// =============================================================================
// Catalog
// =============================================================================

/// All templates in provisioning order
pub static ALL_TEMPLATES: &[&TableTemplate] = &[
    &EXPENSE,
    &TRIP_REQUEST,
    &LEAVE_RECORD,
    &TRAINING_REQUEST,
    &STAFF,
    &COMPANY_CALENDAR,
    &EVIDENCE,
];

pub fn list_templates() -> &'static [&'static TableTemplate] {
    ALL_TEMPLATES
}

/// Get a template by title
pub fn get_template(title: &str) -> Option<&'static TableTemplate> {
    ALL_TEMPLATES.iter().find(|t| t.title == title).copied()
}

/// Sample items for a template, empty when the title is unknown
pub fn get_sample_items(title: &str) -> &'static [&'static SampleItem] {
    get_template(title).map(|t| t.samples).unwrap_or(&[])
}

/// Get all template titles
pub fn template_titles() -> Vec<&'static str> {
    ALL_TEMPLATES.iter().map(|t| t.title).collect()
}
