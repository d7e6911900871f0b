//! CLI command implementations

use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use tabled::{Table, Tabled};
use tkt_core::{ReplyNode, Status, Ticket, TicketService};

#[derive(Tabled)]
struct TicketRow {
    id: String,
    status: String,
    assignee: String,
    title: String,
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            status: ticket.status.to_string(),
            assignee: ticket.assignee.clone().unwrap_or_else(|| "-".to_string()),
            title: ticket.title.clone(),
        }
    }
}

fn print_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("No tickets found");
    } else {
        let rows: Vec<TicketRow> = tickets.iter().map(TicketRow::from).collect();
        println!("{}", Table::new(rows));
    }
}

fn print_reply_tree(nodes: &[ReplyNode], level: usize) {
    let indent = "  ".repeat(level);
    for node in nodes {
        println!("{}- {}", indent, node.reply.content);
        print_reply_tree(&node.children, level + 1);
    }
}

/// Seed sample tickets and walk through every service operation
pub fn demo(service: &TicketService, json: bool) -> Result<()> {
    // Sample data covering all the interesting states
    service.create_ticket("Urgent Server Issue", "Production server down");
    let network = service.create_ticket("Network Problem", "VPN connection failing");
    service.assign_ticket(&network.id, "network.expert")?;

    let bug = service.create_ticket("Software Bug", "Application crash");
    service.resolve_ticket(&bug.id)?;

    let hr = service.create_ticket("Onboarding Access", "New hire missing accounts");
    service.assign_ticket(&hr.id, "hr.agent1")?;
    service.set_due_date(&hr.id, Some(chrono::Utc::now() - chrono::Duration::hours(4)))?;

    // A ticket with a nested discussion
    let thread = service.create_ticket("Reply Test", "Testing reply structure");
    let root = service.add_reply(&thread.id, "Initial investigation", None)?;
    let cause = service.add_reply(&thread.id, "Found potential cause", Some(&root.id))?;
    let extra = service.add_reply(&thread.id, "Additional information", Some(&root.id))?;
    service.add_reply(&thread.id, "Resolution steps", Some(&cause.id))?;
    service.edit_reply(&thread.id, &extra.id, "Updated information")?;

    if json {
        let out = serde_json::json!({
            "tickets": service.all_tickets(),
            "by_department": service.tickets_by_department(),
            "reply_tree": service.replies_tree(&thread.id)?,
            "statistics": service.ticket_statistics()
                .into_iter()
                .map(|(status, count)| (status.to_string(), count))
                .collect::<std::collections::HashMap<_, _>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}", "All tickets".bold());
    print_tickets(&service.all_tickets());

    println!("\n{}", "Most recent".bold());
    for ticket in service.recent_tickets(3) {
        println!("- {}", ticket);
    }

    println!("\n{}", "Open tickets".bold());
    print_tickets(&service.tickets_by_status(Status::Open));

    println!("\n{}", "Assigned to network.expert".bold());
    for ticket in service.tickets_by_assignee("network.expert") {
        println!("- {}", ticket.title);
    }

    println!("\n{}", "By department".bold());
    for (dept, tickets) in service.tickets_by_department() {
        println!("- {}: {} tickets", dept, tickets.len());
    }

    println!("\n{}", "Search for 'server'".bold());
    for ticket in service.search_tickets("server") {
        println!("- {}", ticket.title);
    }

    println!("\n{}", "Reply tree".bold());
    print_reply_tree(&service.replies_tree(&thread.id)?, 0);

    println!("\n{}", "Statistics".bold());
    for (status, count) in service.ticket_statistics() {
        println!("- {}: {} tickets", status, count);
    }
    println!("Unassigned: {}", service.unassigned_tickets().len());
    println!("Overdue: {}", service.overdue_tickets().len());

    println!("\n{} Demo complete", "✓".green());
    Ok(())
}

/// Hammer one store from many threads, then verify the final state
pub fn stress(service: &TicketService, threads: usize, replies: usize, json: bool) -> Result<()> {
    let ticket = service.create_ticket("Stress Test", "Concurrent mutation target");

    let handles: Vec<_> = (0..threads)
        .map(|worker| {
            let service = service.clone();
            let ticket_id = ticket.id.clone();
            std::thread::spawn(move || {
                let mut ids = Vec::with_capacity(replies);
                for i in 0..replies {
                    let reply = service
                        .add_reply(&ticket_id, &format!("worker {} reply {}", worker, i), None)
                        .expect("add_reply failed");
                    ids.push(reply.id);
                }
                service
                    .assign_ticket(&ticket_id, &format!("stress.worker{}", worker))
                    .expect("assign failed");
                ids
            })
        })
        .collect();

    let mut all_ids = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("worker panicked") {
            anyhow::ensure!(all_ids.insert(id), "duplicate reply id");
        }
    }

    let expected = threads * replies;
    let tree = service.replies_tree(&ticket.id)?;
    anyhow::ensure!(
        tree.len() == expected,
        "expected {} root replies, found {}",
        expected,
        tree.len()
    );

    let final_state = service.ticket(&ticket.id)?;
    anyhow::ensure!(final_state.assignee.is_some(), "assignment lost");

    if json {
        println!(
            "{}",
            serde_json::json!({
                "threads": threads,
                "replies_per_thread": replies,
                "total_replies": tree.len(),
                "assignee": final_state.assignee,
            })
        );
    } else {
        println!(
            "{} {} threads x {} replies: {} distinct replies, assignee {}",
            "✓".green(),
            threads,
            replies,
            tree.len(),
            final_state.assignee.unwrap_or_default()
        );
    }

    Ok(())
}
