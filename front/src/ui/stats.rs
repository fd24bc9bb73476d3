use lingo_api::v1::Stats;

pub fn view(stats: &Stats) -> String {
    format!(
        "Total Tasks  {}\nCompleted    {}\nProgress     {}%\nTranslated   {}\n",
        stats.total, stats.completed, stats.completion_percent, stats.translated
    )
}
