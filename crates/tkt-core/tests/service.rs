//! Integration tests for the TicketService facade

use tkt_core::{Error, Status, TicketService};

#[test]
fn created_tickets_are_retrievable_and_listed() {
    let service = TicketService::new();
    let t1 = service.create_ticket("Test Ticket 1", "Description 1");
    service.create_ticket("Test Ticket 2", "Description 2");

    let fetched = service.ticket(&t1.id).unwrap();
    assert_eq!(fetched.id, t1.id);
    assert_eq!(fetched.title, "Test Ticket 1");

    let all = service.all_tickets();
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|t| t.id == t1.id));
}

#[test]
fn get_missing_ticket_fails() {
    let service = TicketService::new();
    assert!(matches!(
        service.ticket("tkt-missing"),
        Err(Error::TicketNotFound(_))
    ));
}

#[test]
fn update_changes_only_text_fields() {
    let service = TicketService::new();
    let ticket = service.create_ticket("Original Title", "Original description");
    service.assign_ticket(&ticket.id, "it.agent1").unwrap();

    let updated = service
        .update_ticket(&ticket.id, "Updated Title", "Updated description")
        .unwrap();
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.description, "Updated description");
    assert_eq!(updated.id, ticket.id);
    assert_eq!(updated.status, Status::Open);
    assert_eq!(updated.assignee.as_deref(), Some("it.agent1"));

    assert!(matches!(
        service.update_ticket("tkt-missing", "x", "y"),
        Err(Error::TicketNotFound(_))
    ));
}

#[test]
fn resolve_is_one_way() {
    let service = TicketService::new();
    let ticket = service.create_ticket("Test Ticket", "Description");

    service.resolve_ticket(&ticket.id).unwrap();
    let err = service.resolve_ticket(&ticket.id).unwrap_err();
    assert!(matches!(err, Error::AlreadyResolved(_)));

    // Idempotent end state despite the error
    assert_eq!(service.ticket(&ticket.id).unwrap().status, Status::Resolved);
}

#[test]
fn reply_tree_shape() {
    let service = TicketService::new();
    let ticket = service.create_ticket("Reply Tree Test", "Testing nested replies");

    let r1 = service.add_reply(&ticket.id, "Root Reply 1", None).unwrap();
    let r2 = service.add_reply(&ticket.id, "Root Reply 2", None).unwrap();
    let c1 = service
        .add_reply(&ticket.id, "Child 1 of Root 1", Some(&r1.id))
        .unwrap();
    let c2 = service
        .add_reply(&ticket.id, "Child 2 of Root 1", Some(&r1.id))
        .unwrap();
    let c3 = service
        .add_reply(&ticket.id, "Child of Child 1", Some(&c1.id))
        .unwrap();

    let tree = service.replies_tree(&ticket.id).unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].reply.id, r1.id);
    assert_eq!(tree[1].reply.id, r2.id);

    let kids: Vec<_> = tree[0].children.iter().map(|n| n.reply.id.clone()).collect();
    assert_eq!(kids, [c1.id.clone(), c2.id]);
    assert_eq!(tree[0].children[0].children[0].reply.id, c3.id);

    let total: usize = tree.iter().map(|n| n.count()).sum();
    assert_eq!(total, 5);
}

#[test]
fn reply_validation_failures() {
    let service = TicketService::new();
    let a = service.create_ticket("A", "");
    let b = service.create_ticket("B", "");
    let root = service.add_reply(&a.id, "root", None).unwrap();

    assert!(matches!(
        service.add_reply("tkt-missing", "x", None),
        Err(Error::TicketNotFound(_))
    ));
    assert!(matches!(
        service.add_reply(&a.id, "x", Some("rpl-missing")),
        Err(Error::UnknownParent { .. })
    ));
    // Cross-ticket parenting is rejected
    assert!(matches!(
        service.add_reply(&b.id, "x", Some(&root.id)),
        Err(Error::UnknownParent { .. })
    ));
}

#[test]
fn edit_reply_keeps_identity_and_position() {
    let service = TicketService::new();
    let ticket = service.create_ticket("T", "");
    let root = service.add_reply(&ticket.id, "first", None).unwrap();
    let child = service
        .add_reply(&ticket.id, "second", Some(&root.id))
        .unwrap();

    service
        .edit_reply(&ticket.id, &child.id, "second, edited")
        .unwrap();

    let tree = service.replies_tree(&ticket.id).unwrap();
    let node = &tree[0].children[0];
    assert_eq!(node.reply.id, child.id);
    assert_eq!(node.reply.parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(node.reply.content, "second, edited");
}

#[test]
fn edit_reply_failures() {
    let service = TicketService::new();
    let a = service.create_ticket("A", "");
    let b = service.create_ticket("B", "");
    let reply = service.add_reply(&a.id, "on a", None).unwrap();

    assert!(matches!(
        service.edit_reply("tkt-missing", &reply.id, "x"),
        Err(Error::TicketNotFound(_))
    ));
    assert!(matches!(
        service.edit_reply(&a.id, "rpl-missing", "x"),
        Err(Error::ReplyNotFound(_))
    ));
    assert!(matches!(
        service.edit_reply(&b.id, &reply.id, "x"),
        Err(Error::ForeignReply { .. })
    ));
}

#[test]
fn status_filter_scenario() {
    let service = TicketService::new();
    let o1 = service.create_ticket("Open 1", "");
    let o2 = service.create_ticket("Open 2", "");
    let r = service.create_ticket("Resolved", "");
    service.resolve_ticket(&r.id).unwrap();

    let open = service.tickets_by_status(Status::Open);
    let open_ids: Vec<_> = open.iter().map(|t| t.id.clone()).collect();
    assert_eq!(open_ids, [o1.id, o2.id]);

    let resolved = service.tickets_by_status(Status::Resolved);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, r.id);
}

#[test]
fn department_grouping_scenario() {
    let service = TicketService::new();
    let it = service.create_ticket("IT Issue", "");
    let hr = service.create_ticket("HR Issue", "");
    service.create_ticket("Unassigned Issue", "");

    service.assign_ticket(&it.id, "it.agent1").unwrap();
    service.assign_ticket(&hr.id, "hr.agent1").unwrap();

    let groups = service.tickets_by_department();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["it"][0].id, it.id);
    assert_eq!(groups["hr"][0].id, hr.id);
}

#[test]
fn search_is_case_insensitive() {
    let service = TicketService::new();
    service.create_ticket("Network Issue", "Connection problems");
    service.create_ticket("Database Error", "SQL query timeout");

    assert_eq!(service.search_tickets("NETWORK").len(), 1);
    assert_eq!(service.search_tickets("sql").len(), 1);
    assert!(service.search_tickets("nonexistent").is_empty());
}

#[test]
fn recent_and_unassigned() {
    let service = TicketService::new();
    let a = service.create_ticket("A", "");
    let b = service.create_ticket("B", "");
    service.assign_ticket(&a.id, "it.agent1").unwrap();

    let recent = service.recent_tickets(1);
    assert_eq!(recent[0].id, b.id);

    let unassigned = service.unassigned_tickets();
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].id, b.id);
}

#[test]
fn overdue_via_explicit_due_date() {
    let service = TicketService::new();
    let ticket = service.create_ticket("Late", "");
    assert!(service.overdue_tickets().is_empty());

    let past = chrono::Utc::now() - chrono::Duration::hours(1);
    service.set_due_date(&ticket.id, Some(past)).unwrap();
    assert_eq!(service.overdue_tickets().len(), 1);

    service.resolve_ticket(&ticket.id).unwrap();
    assert!(service.overdue_tickets().is_empty());
}

#[test]
fn statistics_cover_present_statuses() {
    let service = TicketService::new();
    service.create_ticket("A", "");
    service.create_ticket("B", "");
    let r = service.create_ticket("C", "");
    service.resolve_ticket(&r.id).unwrap();

    let stats = service.ticket_statistics();
    assert_eq!(stats[&Status::Open], 2);
    assert_eq!(stats[&Status::Resolved], 1);
}
