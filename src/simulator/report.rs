//! Simulation report generation.

use crate::achievements::{get_achievement_def, AchievementId, ALL_ACHIEVEMENTS};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one simulated learner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub sessions: u32,
    pub total_rounds: u64,
    pub perfect_sessions: u32,
    pub total_points: u64,
    pub total_stars: u64,
    pub final_level: u32,
    pub achievements: Vec<AchievementId>,
}

/// Aggregated results from multiple simulated learners.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub total_sessions: u64,

    pub avg_final_level: f64,
    pub avg_points_per_session: f64,
    pub avg_stars_per_session: f64,
    pub avg_rounds_per_session: f64,
    pub perfect_session_rate: f64,

    pub level_distribution: BTreeMap<u32, u32>,
    /// Share of learners who unlocked each achievement.
    pub unlock_rates: BTreeMap<AchievementId, f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let total_sessions: u64 = runs.iter().map(|r| r.sessions as u64).sum();

        let per_run = |value: f64| if num_runs == 0 { 0.0 } else { value / num_runs as f64 };
        let per_session = |value: f64| {
            if total_sessions == 0 {
                0.0
            } else {
                value / total_sessions as f64
            }
        };

        let avg_final_level = per_run(runs.iter().map(|r| r.final_level as f64).sum());
        let avg_points_per_session = per_session(runs.iter().map(|r| r.total_points as f64).sum());
        let avg_stars_per_session = per_session(runs.iter().map(|r| r.total_stars as f64).sum());
        let avg_rounds_per_session = per_session(runs.iter().map(|r| r.total_rounds as f64).sum());
        let perfect_session_rate =
            per_session(runs.iter().map(|r| r.perfect_sessions as f64).sum());

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        let unlock_rates = ALL_ACHIEVEMENTS
            .iter()
            .map(|def| {
                let unlocked = runs.iter().filter(|r| r.achievements.contains(&def.id)).count();
                (def.id, per_run(unlocked as f64))
            })
            .collect();

        Self {
            num_runs,
            total_sessions,
            avg_final_level,
            avg_points_per_session,
            avg_stars_per_session,
            avg_rounds_per_session,
            perfect_session_rate,
            level_distribution,
            unlock_rates,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Learners: {}, sessions: {}\n\n",
            self.num_runs, self.total_sessions
        ));

        report.push_str("── PER SESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Points:          {:.1}\n",
            self.avg_points_per_session
        ));
        report.push_str(&format!(
            "  Avg Stars:           {:.1}\n",
            self.avg_stars_per_session
        ));
        report.push_str(&format!(
            "  Avg Rounds:          {:.2}\n",
            self.avg_rounds_per_session
        ));
        report.push_str(&format!(
            "  Perfect Sessions:    {:.1}%\n\n",
            self.perfect_session_rate * 100.0
        ));

        report.push_str("── LEVELS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        for (level, count) in &self.level_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── ACHIEVEMENTS ─────────────────────────────────────────────────\n");
        for (id, rate) in &self.unlock_rates {
            let name = get_achievement_def(*id).map(|d| d.name).unwrap_or("?");
            report.push_str(&format!("  {:<16} {:>5.1}%\n", name, rate * 100.0));
        }

        if self.avg_rounds_per_session > 3.0 {
            report.push_str("\n  ⚠️  Learners need many retry rounds - lists too hard?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
