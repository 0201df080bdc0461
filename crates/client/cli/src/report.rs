//! Event tallies and the end-of-run summary.
use std::fmt;

use tokio::sync::broadcast::{self, error::TryRecvError};

use game_core::{BattlerEvent, DifficultyEvent};
use runtime::{Event, Session, SessionEvent, Topic};

/// Counts what happened during a run by listening on the event bus.
pub struct RunReport {
    receivers: Vec<(Topic, broadcast::Receiver<Event>)>,
    spawned: u32,
    elites: u32,
    defeated: u32,
    darkness_spells: u32,
    drops: u32,
    picked_up: u32,
    hero_level_ups: u32,
    peak_erosion: u32,
    lagged: u64,
}

impl RunReport {
    pub fn new(session: &Session) -> Self {
        Self {
            receivers: session
                .bus()
                .subscribe_multiple(&[Topic::Session, Topic::Battler, Topic::Difficulty]),
            spawned: 0,
            elites: 0,
            defeated: 0,
            darkness_spells: 0,
            drops: 0,
            picked_up: 0,
            hero_level_ups: 0,
            peak_erosion: session.difficulty().level(),
            lagged: 0,
        }
    }

    /// Drains every event published since the last call.
    pub fn collect(&mut self) {
        let mut events = Vec::new();
        for (topic, receiver) in &mut self.receivers {
            loop {
                match receiver.try_recv() {
                    Ok(event) => events.push(event),
                    Err(TryRecvError::Lagged(skipped)) => {
                        tracing::warn!(?topic, skipped, "report receiver lagged");
                        self.lagged += skipped;
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }
        for event in &events {
            self.record(event);
        }
    }

    fn record(&mut self, event: &Event) {
        match event {
            Event::Session(SessionEvent::EnemySpawned { elite, .. }) => {
                self.spawned += 1;
                if *elite {
                    self.elites += 1;
                }
            }
            Event::Session(SessionEvent::EnemyDefeated { .. }) => self.defeated += 1,
            Event::Session(SessionEvent::ItemDropped { .. }) => self.drops += 1,
            Event::Session(SessionEvent::ItemPickedUp { .. }) => self.picked_up += 1,
            Event::Session(SessionEvent::DarknessStarted) => self.darkness_spells += 1,
            Event::Hero(BattlerEvent::LevelChanged { old, new }) if new > old => {
                self.hero_level_ups += new - old;
            }
            Event::Difficulty(DifficultyEvent::ErosionLevelChanged { new, .. }) => {
                self.peak_erosion = self.peak_erosion.max(*new);
            }
            _ => {}
        }
    }

    pub fn summary<'a>(&'a self, session: &'a Session) -> Summary<'a> {
        Summary {
            report: self,
            session,
        }
    }
}

pub struct Summary<'a> {
    report: &'a RunReport,
    session: &'a Session,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session;
        let hero = session.hero();
        let report = self.report;
        let outcome = if session.is_over() { "fell" } else { "survived" };

        writeln!(f, "== run summary ==")?;
        writeln!(
            f,
            "difficulty   {} ({})",
            session.difficulty().selected(),
            session.difficulty().selected().moon_phase()
        )?;
        writeln!(f, "elapsed      {:.1}s, hero {outcome}", session.elapsed())?;
        writeln!(
            f,
            "hero         level {} (+{}), hp {:.0}/{:.0}, gold {}",
            hero.level(),
            report.hero_level_ups,
            hero.battler().cur_hp(),
            hero.battler().max_hp(),
            hero.gold()
        )?;
        writeln!(
            f,
            "erosion      level {} (peak {}), stage {}",
            session.difficulty().level(),
            report.peak_erosion,
            session.difficulty().stage()
        )?;
        writeln!(
            f,
            "enemies      {} spawned ({} elite), {} defeated, {} alive",
            report.spawned,
            report.elites,
            report.defeated,
            session.arena().live_count()
        )?;
        writeln!(
            f,
            "drops        {} dropped, {} picked up",
            report.drops, report.picked_up
        )?;
        write!(
            f,
            "light        {:.0}/{:.0}, {} darkness spells",
            session.light().current(),
            session.light().config().max_gauge,
            report.darkness_spells
        )?;
        if report.lagged > 0 {
            write!(f, "\n({} events missed by the report)", report.lagged)?;
        }
        Ok(())
    }
}
