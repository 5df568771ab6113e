use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use event_records::{
    logging, ClientChanges, ClientForm, Config, EmployeeChanges, EmployeeForm, EntityKind,
    EventChanges, EventForm, FieldValues, GuestChanges, GuestForm, Notice, Office, OfficeError,
    OfficeResult, RecordId, SupplierChanges, SupplierForm, VenueChanges, VenueForm, VERSION,
};

const USAGE: &str = "\
usage: event-records [--data-dir <path>] <command>

  summary                        record counts and next IDs (default)
  list <kind>                    every record of a kind
  show <ID>                      one record
  add <kind> field=value...      create a record
  modify <ID> field=value...     change a record (omitted fields stay)
  remove <ID>                    delete a record
  attach <EV ID> <G/V ID>        attach a guest or venue to an event
  detach <EV ID> <G/V/SP ID>     detach a guest, venue or supplier
  supply <EV ID> field=value...  create a supplier owned by an event";

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = take_config(&mut args)?;

    logging::init(&config);

    let mut office = Office::open(&config);
    print_notices(&office.take_notices());

    let command = args.first().map(String::as_str);
    let rest = args.get(1..).unwrap_or_default();

    match command {
        None | Some("summary") => run_summary(&office, &config),
        Some("list") => {
            let name = rest.first().context("list needs a kind, e.g. `list guests`")?;
            run_list(&office, name)
        }
        Some("show") => {
            let id = rest.first().context("show needs an ID, e.g. `show EV3`")?;
            let summary = or_exit(office.find_record(id));
            println!("{}", summary);
            Ok(())
        }
        Some("add") => {
            let name = rest.first().context("add needs a kind, e.g. `add guest first_name=Ann ...`")?;
            run_add(&mut office, name, &rest[1..])
        }
        Some("modify") => {
            let id = rest.first().context("modify needs an ID, e.g. `modify EP2 salary=52000`")?;
            run_modify(&mut office, id, &rest[1..])
        }
        Some("remove") => {
            let id = rest.first().context("remove needs an ID, e.g. `remove V4`")?;
            run_remove(&mut office, id)
        }
        Some("attach") | Some("detach") => {
            let (event_id, other_id) = match rest {
                [event_id, other_id, ..] => (event_id, other_id),
                _ => bail!("{} needs an event ID and a guest or venue ID", args[0]),
            };
            run_link(&mut office, &args[0] == "attach", event_id, other_id)
        }
        Some("supply") => {
            let event_id = rest.first().context("supply needs an event ID, e.g. `supply EV1 name=...`")?;
            run_supply(&mut office, event_id, &rest[1..])
        }
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            Ok(())
        }
        Some(other) => bail!("unknown command `{}`\n{}", other, USAGE),
    }
}

/// Pull `--data-dir <path>` out of the arguments, leaving the command behind.
fn take_config(args: &mut Vec<String>) -> Result<Config> {
    let mut config = Config::new();

    if let Some(pos) = args.iter().position(|a| a == "--data-dir") {
        let path = args
            .get(pos + 1)
            .cloned()
            .context("--data-dir needs a path")?;
        config = config.with_data_dir(PathBuf::from(path));
        args.drain(pos..=pos + 1);
    }

    Ok(config)
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        if notice.is_error() {
            eprintln!("❌ {}: {}", notice.severity.as_str(), notice);
        } else {
            println!("ℹ️  {}: {}", notice.severity.as_str(), notice);
        }
    }
}

/// Rejected requests are shown like any other notice and end the process.
fn or_exit<T>(result: OfficeResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            print_notices(&[err.notice()]);
            std::process::exit(1);
        }
    }
}

fn parse_id(raw: &str) -> RecordId {
    or_exit(
        raw.parse()
            .map_err(|_| OfficeError::UnknownId(raw.trim().to_string())),
    )
}

fn run_summary(office: &Office, config: &Config) -> Result<()> {
    println!("📋 Event Records v{}", VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Data directory: {}\n", config.data_dir().display());

    for kind in EntityKind::ALL {
        let next = office
            .next_id(kind)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none left".to_string());
        println!(
            "  {:<10} {:>5} records   next ID {}",
            kind.label(),
            office.count(kind),
            next
        );
    }

    Ok(())
}

fn run_list(office: &Office, name: &str) -> Result<()> {
    let kind = match EntityKind::from_name(name) {
        Some(kind) => kind,
        None => bail!("unknown kind `{}` (try employees, events, suppliers, guests, clients, venues)", name),
    };

    let summaries = office.summaries(kind);
    if summaries.is_empty() {
        println!("No {} records.", kind.label().to_lowercase());
        return Ok(());
    }

    for summary in summaries {
        println!("{}\n", summary);
    }
    Ok(())
}

fn run_add(office: &mut Office, name: &str, pairs: &[String]) -> Result<()> {
    let kind = match EntityKind::from_name(name) {
        Some(kind) => kind,
        None => bail!("unknown kind `{}`", name),
    };
    let mut fields = or_exit(FieldValues::parse(pairs));

    let id = match kind {
        EntityKind::Employee => {
            let form = EmployeeForm {
                person: fields.person(),
                department: fields.take("department"),
                job_title: fields.take("job_title"),
                salary: fields.take("salary"),
            };
            or_exit(fields.finish());
            office.add_employee(&form)
        }
        EntityKind::Event => {
            let form = EventForm {
                event_type: fields.take("event_type"),
                date: fields.take("date"),
                time: fields.take("time"),
                duration: fields.take("duration"),
            };
            or_exit(fields.finish());
            office.add_event(&form)
        }
        EntityKind::Supplier => {
            let form = supplier_form(&mut fields);
            or_exit(fields.finish());
            office.add_supplier(&form)
        }
        EntityKind::Guest => {
            let form = GuestForm {
                person: fields.person(),
            };
            or_exit(fields.finish());
            office.add_guest(&form)
        }
        EntityKind::Client => {
            let form = ClientForm {
                person: fields.person(),
                budget: fields.take("budget"),
                num_of_events: fields.take("num_of_events"),
            };
            or_exit(fields.finish());
            office.add_client(&form)
        }
        EntityKind::Venue => {
            let form = VenueForm {
                address: fields.take("address"),
                min_guests: fields.take("min_guests"),
                max_guests: fields.take("max_guests"),
            };
            or_exit(fields.finish());
            office.add_venue(&form)
        }
    };

    let id = or_exit(id);
    print_notices(&office.take_notices());
    println!("✓ {} created: {}", kind.label(), id);
    Ok(())
}

fn run_modify(office: &mut Office, raw_id: &str, pairs: &[String]) -> Result<()> {
    let id = parse_id(raw_id);
    let mut fields = or_exit(FieldValues::parse(pairs));

    let result = match id.kind() {
        EntityKind::Employee => {
            let changes = EmployeeChanges {
                department: fields.take("department"),
                job_title: fields.take("job_title"),
                salary: fields.take("salary"),
            };
            or_exit(fields.finish());
            office.modify_employee(raw_id, &changes)
        }
        EntityKind::Event => {
            let changes = EventChanges {
                event_type: fields.take("event_type"),
                date: fields.take("date"),
                time: fields.take("time"),
                duration: fields.take("duration"),
            };
            or_exit(fields.finish());
            office.modify_event(raw_id, &changes)
        }
        EntityKind::Supplier => {
            let changes = SupplierChanges {
                name: fields.take("name"),
                service_type: fields.take("service_type"),
            };
            or_exit(fields.finish());
            office.modify_supplier(raw_id, &changes)
        }
        EntityKind::Guest => {
            let changes = GuestChanges {
                first_name: fields.take("first_name"),
                last_name: fields.take("last_name"),
                phone_number: fields.take("phone_number"),
            };
            or_exit(fields.finish());
            office.modify_guest(raw_id, &changes)
        }
        EntityKind::Client => {
            let changes = ClientChanges {
                budget: fields.take("budget"),
                num_of_events: fields.take("num_of_events"),
            };
            or_exit(fields.finish());
            office.modify_client(raw_id, &changes)
        }
        EntityKind::Venue => {
            let changes = VenueChanges {
                address: fields.take("address"),
                min_guests: fields.take("min_guests"),
                max_guests: fields.take("max_guests"),
            };
            or_exit(fields.finish());
            office.modify_venue(raw_id, &changes)
        }
    };

    or_exit(result);
    print_notices(&office.take_notices());
    println!("✓ {} modified", id);
    Ok(())
}

fn run_remove(office: &mut Office, raw_id: &str) -> Result<()> {
    let id = parse_id(raw_id);

    let result = match id.kind() {
        EntityKind::Employee => office.remove_employee(raw_id).map(drop),
        EntityKind::Event => office.remove_event(raw_id).map(drop),
        EntityKind::Supplier => office.remove_supplier(raw_id).map(drop),
        EntityKind::Guest => office.remove_guest(raw_id).map(drop),
        EntityKind::Client => office.remove_client(raw_id).map(drop),
        EntityKind::Venue => office.remove_venue(raw_id).map(drop),
    };

    or_exit(result);
    print_notices(&office.take_notices());
    println!("✓ {} removed", id);
    Ok(())
}

fn run_link(office: &mut Office, attach: bool, event_id: &str, other_id: &str) -> Result<()> {
    let other = parse_id(other_id);

    let changed = match (attach, other.kind()) {
        (true, EntityKind::Guest) => office.attach_guest(event_id, other_id).map(|_| true),
        (true, EntityKind::Venue) => office.attach_venue(event_id, other_id),
        (false, EntityKind::Guest) => office.detach_guest(event_id, other_id),
        (false, EntityKind::Venue) => office.detach_venue(event_id, other_id),
        (false, EntityKind::Supplier) => office.remove_event_supplier(event_id, other_id),
        (_, kind) => bail!("a {} cannot be {} an event", kind.label().to_lowercase(),
            if attach { "attached to" } else { "detached from" }),
    };

    let changed = or_exit(changed);
    print_notices(&office.take_notices());
    if changed {
        println!("✓ {} {} {}", event_id.trim(), if attach { "now has" } else { "no longer has" }, other);
    } else {
        println!("Nothing to do for {} on {}", other, event_id.trim());
    }
    Ok(())
}

fn run_supply(office: &mut Office, event_id: &str, pairs: &[String]) -> Result<()> {
    let mut fields = or_exit(FieldValues::parse(pairs));
    let form = supplier_form(&mut fields);
    or_exit(fields.finish());

    let supplier = or_exit(office.add_event_supplier(event_id, &form));
    print_notices(&office.take_notices());
    println!("✓ {} supplied by {}", event_id.trim(), supplier);
    Ok(())
}

fn supplier_form(fields: &mut FieldValues) -> SupplierForm {
    SupplierForm {
        name: fields.take("name"),
        service_type: fields.take("service_type"),
    }
}
