use chrono::NaiveDate;

use crate::cli::PromptKind;
use crate::cli::commands::show::date_or_today;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::log_service::LogService;
use crate::core::services::period::ReportPeriod;
use crate::core::services::validation::DATE_FORMAT;
use crate::core::traits::log_store::LogStore;

/// Execute the `worklog prompt` command.
///
/// Resolves the period around the anchor date, renders its report and
/// wraps it in instructions for writing a daily, weekly or monthly report.
pub fn execute<S: LogStore>(service: &LogService<S>, kind: &PromptKind) -> Result<()> {
    let (period, anchor) = match kind {
        PromptKind::Daily { date } => (ReportPeriod::Daily, date),
        PromptKind::Weekly { date } => (ReportPeriod::Weekly, date),
        PromptKind::Monthly { date } => (ReportPeriod::Monthly, date),
    };
    let anchor = date_or_today(anchor.as_deref())?;
    let (start, end) = period.bounds(anchor);

    let report = match period {
        ReportPeriod::Daily => service.reports().render_for_date(start)?,
        _ => service.reports().render_for_period(start, end)?,
    };

    output::report(&build_prompt(period, start, end, &report));
    Ok(())
}

/// Wrap a rendered report in the instructions for its period.
pub fn build_prompt(period: ReportPeriod, start: NaiveDate, end: NaiveDate, report: &str) -> String {
    let start = start.format(DATE_FORMAT);
    let end = end.format(DATE_FORMAT);

    let (title, scope, points) = match period {
        ReportPeriod::Daily => (
            "日報",
            format!("{start} の作業ログ"),
            "- 今日実施した作業を簡潔にまとめてください\n\
             - 成果と課題を分けて記載してください\n\
             - 明日に持ち越す作業があれば挙げてください",
        ),
        ReportPeriod::Weekly => (
            "週報",
            format!("{start} 〜 {end} の作業ログ"),
            "- 今週の主な成果をまとめてください\n\
             - 日ごとの作業の流れを振り返ってください\n\
             - 来週の目標を提案してください",
        ),
        ReportPeriod::Monthly => (
            "月報",
            format!("{start} 〜 {end} の作業ログ"),
            "- 今月の主な成果と進捗をまとめてください\n\
             - カテゴリ別の傾向を分析してください\n\
             - 来月に向けた改善点を挙げてください",
        ),
    };

    format!(
        "以下は{scope}です。この内容をもとに{title}を作成してください。\n\n\
         {points}\n\n\
         ---\n\n\
         {report}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn daily_prompt_names_the_day_and_embeds_report() {
        let prompt = build_prompt(ReportPeriod::Daily, d("2025-11-01"), d("2025-11-01"), "REPORT\n");
        assert!(prompt.starts_with("以下は2025-11-01 の作業ログです。"));
        assert!(prompt.contains("日報"));
        assert!(prompt.ends_with("---\n\nREPORT\n"));
    }

    #[test]
    fn weekly_and_monthly_prompts_name_the_range() {
        let weekly = build_prompt(ReportPeriod::Weekly, d("2025-10-27"), d("2025-11-02"), "R");
        assert!(weekly.contains("2025-10-27 〜 2025-11-02"));
        assert!(weekly.contains("週報"));

        let monthly = build_prompt(ReportPeriod::Monthly, d("2025-12-01"), d("2025-12-31"), "R");
        assert!(monthly.contains("2025-12-01 〜 2025-12-31"));
        assert!(monthly.contains("月報"));
    }
}
