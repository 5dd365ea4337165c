use crate::cli::commands::open_guarded;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::view::{self, ExpansionPrefs, Filters};
use crate::db::prefs::{load_expansion, load_sort_state, save_expansion, save_sort_state};
use crate::db::store::{HistoryStore, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::groups::{ClientGroup, EmployerGroup};
use crate::models::history::HistoryRecord;
use crate::models::sort::{SortField, SortState};
use crate::models::status::StatusFilter;
use crate::ui::messages::{info, warning};
use crate::utils::colors::{BLUE, CYAN, GREY, RESET, color_for_status};
use crate::utils::date::format_date;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        employer,
        position,
        status,
        sort_by,
        clear_sort,
        toggle,
    } = cmd
    {
        //
        // 1️⃣ Validate input before touching the session
        //
        let status =
            StatusFilter::from_code(status).ok_or_else(|| AppError::InvalidStatus(status.clone()))?;
        let sort_field = match sort_by {
            Some(s) => {
                Some(SortField::from_db_str(s).ok_or_else(|| AppError::InvalidSortField(s.clone()))?)
            }
            None => None,
        };

        let pool = open_guarded(cfg)?;

        //
        // 2️⃣ Persisted view state
        //
        let mut sort = load_sort_state(&pool.conn)?;
        if *clear_sort {
            sort.clear();
        }
        if let Some(field) = sort_field {
            sort.click(field);
        }
        if *clear_sort || sort_field.is_some() {
            save_sort_state(&pool.conn, &sort)?;
        }

        let mut prefs = load_expansion(&pool.conn)?;

        //
        // 3️⃣ Build view
        //
        let records = SqliteStore::new(&pool.conn).fetch_all()?;
        let filters = Filters {
            employer: employer.clone().unwrap_or_default(),
            position: position.clone().unwrap_or_default(),
            status,
        };
        let groups = view::build_view(&records, &filters, &sort, &mut prefs);

        if let Some(name) = toggle {
            match resolve_employer(name, &groups, &prefs) {
                Some(canonical) => {
                    let expanded = prefs.toggle(&canonical);
                    info(format!(
                        "{} {}",
                        canonical,
                        if expanded { "expanded" } else { "collapsed" }
                    ));
                }
                None => warning(format!("No employer named '{}'", name)),
            }
        }

        save_expansion(&pool.conn, &prefs)?;

        //
        // 4️⃣ Render
        //
        render(&groups, &prefs, &sort, &filters, cfg);
    }
    Ok(())
}

/// Case-insensitive lookup among shown and remembered employers.
fn resolve_employer(name: &str, groups: &[EmployerGroup], prefs: &ExpansionPrefs) -> Option<String> {
    let name = name.trim();
    groups
        .iter()
        .map(|g| g.employer_name.as_str())
        .chain(prefs.entries().map(|(k, _)| k))
        .find(|k| k.eq_ignore_ascii_case(name))
        .map(str::to_string)
}

fn render(
    groups: &[EmployerGroup],
    prefs: &ExpansionPrefs,
    sort: &SortState,
    filters: &Filters,
    cfg: &Config,
) {
    if let Some(field) = sort.field {
        println!(
            "{}Sorted by {} {}{}",
            GREY,
            field.to_db_str(),
            sort.direction.arrow(),
            RESET
        );
    }

    if groups.is_empty() {
        if filters.is_empty() {
            info("No employment records yet. Use `rworkhistory add` to create one.");
        } else {
            info("No records match the current filters.");
        }
        return;
    }

    for g in groups {
        let n = g.total_records();
        let plural = if n == 1 { "record" } else { "records" };

        if !prefs.is_expanded(&g.employer_name) {
            println!(
                "{}▸ {}{} {}({} {}){}",
                BLUE,
                bold(&g.employer_name),
                RESET,
                GREY,
                n,
                plural,
                RESET
            );
            continue;
        }

        println!(
            "{}▾ {}{} {}({} {}){}",
            BLUE,
            bold(&g.employer_name),
            RESET,
            GREY,
            n,
            plural,
            RESET
        );

        for cg in &g.client_groups {
            render_client(cg, cfg);
        }
        println!();
    }
}

fn render_client(cg: &ClientGroup, cfg: &Config) {
    let color = if cg.is_no_client() { GREY } else { CYAN };
    println!("  {}◦ {}{}", color, cg.client_name, RESET);

    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Position", 28),
        Column::new("From", 13),
        Column::new("To", 13),
        Column::new("Description", 32),
    ])
    .with_separator(cfg.separator());

    for r in &cg.records {
        table.add_row(row_cells(r, cfg));
    }

    for (i, line) in table.render().lines().enumerate() {
        // righe dati (dopo header e separatore) colorate per stato
        let rec = i.checked_sub(2).and_then(|idx| cg.records.get(idx));
        match rec {
            Some(r) => println!("    {}{}{}", color_for_status(r.till), line, RESET),
            None => println!("    {}", line),
        }
    }
}

fn row_cells(r: &HistoryRecord, cfg: &Config) -> Vec<String> {
    vec![
        r.id.to_string(),
        r.position.clone(),
        format_date(Some(r.from), &cfg.date_format),
        if r.till {
            "Present".to_string()
        } else {
            format_date(r.to, &cfg.date_format)
        },
        r.description.clone().unwrap_or_default(),
    ]
}
