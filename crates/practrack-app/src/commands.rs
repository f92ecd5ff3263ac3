//! 계정/조회 커맨드.

use anyhow::{anyhow, bail, Context, Result};
use practrack_core::models::course::{Course, CourseTimeStat};
use practrack_core::models::timer::format_elapsed;
use practrack_core::ports::api_client::ApiClient;
use practrack_network::auth::NewAccount;
use tracing::info;

use crate::app::AppContext;

/// 로그인 자격증명 환경변수
pub const EMAIL_ENV: &str = "PRACTRACK_EMAIL";
pub const PASSWORD_ENV: &str = "PRACTRACK_PASSWORD";

/// 인자 → 환경변수 순으로 값 결정
pub fn resolve_credential(arg: Option<String>, env_key: &str) -> Option<String> {
    arg.filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env_key).ok().filter(|v| !v.is_empty()))
}

pub async fn login(app: &AppContext, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = resolve_credential(email, EMAIL_ENV)
        .ok_or_else(|| anyhow!("이메일이 필요합니다 (--email 또는 {EMAIL_ENV})"))?;
    let password = resolve_credential(password, PASSWORD_ENV)
        .ok_or_else(|| anyhow!("비밀번호가 필요합니다 (--password 또는 {PASSWORD_ENV})"))?;

    info!("서버 로그인 시도: {email}");
    let user = app.tokens.login(&email, &password).await?;
    println!("👋 {}님 환영합니다", user.display_name());
    if user.is_admin {
        println!("   관리자 계정입니다");
    }
    Ok(())
}

pub async fn register(app: &AppContext, account: NewAccount) -> Result<()> {
    app.tokens
        .register(&account)
        .await
        .with_context(|| format!("회원가입 실패: {}", account.email))?;
    println!("✅ 가입 완료: {}", account.email);
    println!("   practrack login --email {} 로 로그인하세요", account.email);
    Ok(())
}

pub async fn logout(app: &AppContext) -> Result<()> {
    if app.tokens.logout().await? {
        println!("로그아웃했습니다");
    } else {
        println!("로그인 상태가 아닙니다");
    }
    Ok(())
}

pub async fn whoami(app: &AppContext) -> Result<()> {
    match app.session.user().await {
        Some(user) => {
            println!("{} <{}>", user.display_name(), user.email);
            println!("학생 ID: {}", user.id);
            if user.is_admin {
                println!("권한: 관리자");
            }
        }
        None => println!("로그인 상태가 아닙니다"),
    }
    Ok(())
}

/// 코스 목록 한 줄
pub fn course_line(course: &Course) -> String {
    match course.description.as_deref().filter(|d| !d.is_empty()) {
        Some(description) => format!("{:>4}  {}  ({description})", course.id.0, course.name),
        None => format!("{:>4}  {}", course.id.0, course.name),
    }
}

/// 통계 표 한 줄
pub fn stat_line(stat: &CourseTimeStat) -> String {
    format!(
        "{:<24} {:>10} {:>6} sessions  avg {}",
        stat.course_name,
        stat.total_label(),
        stat.sessions,
        format_elapsed(stat.average_secs()),
    )
}

pub async fn courses(app: &AppContext) -> Result<()> {
    let courses = app.api.list_courses().await?;
    if courses.is_empty() {
        println!("배정된 코스가 없습니다");
        return Ok(());
    }
    for course in &courses {
        println!("{}", course_line(course));
    }
    Ok(())
}

pub async fn stats(app: &AppContext, student_id: Option<i64>) -> Result<()> {
    let student_id = match student_id {
        Some(id) => id,
        None => match app.session.user().await {
            Some(user) => user.id,
            None => bail!("로그인이 필요합니다"),
        },
    };

    let stats = app.api.time_stats(student_id).await?;
    if stats.is_empty() {
        println!("기록된 연습 시간이 없습니다");
        return Ok(());
    }

    let total: u64 = stats.iter().map(|s| s.total_time).sum();
    for stat in &stats {
        println!("{}", stat_line(stat));
    }
    println!("합계 {}", format_elapsed(total));
    Ok(())
}
