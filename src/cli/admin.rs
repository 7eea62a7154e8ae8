//! Admin commands - team and match listings

use clap::Args;

use crate::domain::TeamStatus;
use crate::infrastructure::http::create_abort_controller;

#[derive(Args, Clone)]
pub struct TeamsArgs {
    /// Only teams in this review state (pending, approved, rejected)
    #[arg(long)]
    pub status: Option<TeamStatus>,
}

pub async fn teams(args: TeamsArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_client_state_with_config(&config)?;

    let controller = create_abort_controller(None);
    let signal = controller.signal();
    super::cancel_on_ctrl_c(controller);

    let teams = state.tournament.list_teams(args.status, &signal).await?;
    for team in teams {
        println!(
            "{}\t{}\t{}\t{}\t{} players",
            team.id, team.team_name, team.category, team.status, team.player_count
        );
    }

    Ok(())
}

pub async fn matches() -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_client_state_with_config(&config)?;

    let controller = create_abort_controller(None);
    let signal = controller.signal();
    super::cancel_on_ctrl_c(controller);

    let matches = state.tournament.list_matches(&signal).await?;
    for fixture in matches {
        println!(
            "{}\t{}\t{} vs {}\t{}",
            fixture.id,
            fixture.scheduled_at.to_rfc3339(),
            fixture.home_team_id,
            fixture.away_team_id,
            fixture.venue
        );
    }

    Ok(())
}
