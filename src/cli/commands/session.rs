use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::guard::{self, ms_to_minutes};
use crate::core::session::activity::LineActivity;
use crate::core::session::watcher::{SystemClock, WatchOutcome, Watcher};
use crate::core::session::{Phase, SessionEvent, SessionMonitor, TimeoutSettings};
use crate::db::log::audit;
use crate::db::login::{DbLogin, load_login, save_activity};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, session_warning, success, warning};
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use chrono::{DateTime, Local, Utc};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session {
        status,
        extend,
        stay_signed_in,
        watch,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let acted = *extend || stay_signed_in.is_some() || *watch;

        if *extend {
            extend_session(&pool, cfg)?;
        }

        if let Some(toggle) = stay_signed_in {
            set_stay_signed_in(&pool, cfg, toggle.is_on())?;
        }

        if *status || !acted {
            print_status(&pool, cfg)?;
        }

        if *watch {
            watch_session(&pool, cfg)?;
        }
    }
    Ok(())
}

fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Does not count as activity. An overdue session is logged out.
fn print_status(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let Some(row) = load_login(&pool.conn)? else {
        info("Not logged in.");
        return Ok(());
    };

    let now = Utc::now();
    let settings = TimeoutSettings::from_config(cfg)?;
    let mut monitor = SessionMonitor::resume(
        settings,
        DbLogin::new(&pool.conn),
        row.last_activity,
        row.stay_signed_in,
    );
    let events = monitor.poll(now)?;

    if events.contains(&SessionEvent::Expired) {
        audit(&pool.conn, "expired", &row.username, "Session expired due to inactivity")?;
        warning("Your session has expired due to inactivity. You have been logged out.");
        return Ok(());
    }

    let phase = monitor.phase();
    let phase_color = match phase {
        Phase::Active | Phase::Suspended => GREEN,
        _ => YELLOW,
    };

    println!("{}• User:{} {}", CYAN, RESET, row.username);
    println!("{}• Logged in:{} {}", CYAN, RESET, local(row.logged_in_at));
    println!("{}• Last activity:{} {}", CYAN, RESET, local(row.last_activity));
    println!(
        "{}• State:{} {}{}{}",
        CYAN,
        RESET,
        phase_color,
        phase.as_str(),
        RESET
    );

    match monitor.remaining(now) {
        Some(left) => println!(
            "{}• Expires in:{} {} min",
            CYAN,
            RESET,
            ms_to_minutes(left.num_milliseconds())
        ),
        None => println!("{}• Expires:{} never (stay signed in)", CYAN, RESET),
    }
    Ok(())
}

/// Nothing to extend while stay-signed-in keeps the timer off.
fn extend_session(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let pass = guard::enter(&pool.conn, cfg, Utc::now())?;
    if !pass.refreshed {
        info("Stay signed in is on: the session never times out.");
        return Ok(());
    }
    audit(&pool.conn, "extend", &pass.user, "Session extended")?;
    success("Session extended.");
    Ok(())
}

fn set_stay_signed_in(pool: &DbPool, cfg: &Config, value: bool) -> AppResult<()> {
    let now = Utc::now();
    let user = guard::enter(&pool.conn, cfg, now)?.user;
    let row = load_login(&pool.conn)?.ok_or(AppError::NotLoggedIn)?;

    let mut monitor = SessionMonitor::resume(
        TimeoutSettings::from_config(cfg)?,
        DbLogin::new(&pool.conn),
        row.last_activity,
        row.stay_signed_in,
    );
    monitor.set_stay_signed_in(now, value);
    save_activity(&pool.conn, monitor.state())?;

    audit(
        &pool.conn,
        "stay_signed_in",
        &user,
        if value { "Stay signed in enabled" } else { "Stay signed in disabled" },
    )?;

    if value {
        success("Stay signed in: the session will not time out.");
    } else {
        success(format!(
            "Stay signed in disabled: the session expires after {} minutes of inactivity.",
            cfg.session_timeout_minutes
        ));
    }
    Ok(())
}

/// Keep the session in the foreground, fed by lines typed on stdin.
fn watch_session(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let user = guard::enter(&pool.conn, cfg, Utc::now())?.user;
    let row = load_login(&pool.conn)?.ok_or(AppError::NotLoggedIn)?;

    let mut monitor = SessionMonitor::resume(
        TimeoutSettings::from_config(cfg)?,
        DbLogin::new(&pool.conn),
        row.last_activity,
        row.stay_signed_in,
    );
    monitor.subscribe_warning(|ms| session_warning(ms_to_minutes(ms)));

    info(format!(
        "Watching session of {user}. Type anything to stay active, `e` to extend, \
         `stay on`/`stay off`, `q` to log out."
    ));

    let mut source = LineActivity::new(io::BufReader::new(io::stdin()));
    let outcome = Watcher::new(&mut monitor, &mut source, SystemClock)
        .run(|state| save_activity(&pool.conn, state))?;

    match outcome {
        WatchOutcome::Expired => {
            audit(&pool.conn, "expired", &user, "Session expired due to inactivity")?;
            warning("Your session has expired due to inactivity. You have been logged out.");
        }
        WatchOutcome::LoggedOut => {
            audit(&pool.conn, "logout", &user, "Logged out")?;
            success(format!("Logged out {user}"));
        }
        WatchOutcome::Ended => info("The session was ended elsewhere."),
        WatchOutcome::InputClosed => info("Input closed, session left open."),
    }
    Ok(())
}
