#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeDelta, Utc};
    use tokio::sync::mpsc::UnboundedReceiver;

    use crate::app_system::{sweep_stale_orders, OrderSystem};
    use crate::clients::OrderClient;
    use crate::config::Settings;
    use crate::console::{self, Command, Step};
    use crate::domain::{OrderCreate, OrderStatus};
    use crate::mock_framework::{create_mock_client, expect_create};
    use crate::notify::{drain, ChannelNotifier, Level, Notification};
    use crate::order_actor::OrderError;
    use crate::session::{ClientTab, CourierTab, FormField, Screen, Session};
    use crate::views::filters;

    async fn start_system() -> OrderSystem {
        let settings = Settings {
            seed_sample_orders: false,
            stale_order_minutes: 0,
            ..Settings::default()
        };
        OrderSystem::start(&settings).await.unwrap()
    }

    fn session(name: &str, orders: &OrderClient) -> (Session, UnboundedReceiver<Notification>) {
        let (notifier, receiver) = ChannelNotifier::new();
        (Session::new(name, orders.clone(), Arc::new(notifier)), receiver)
    }

    async fn post_order(client: &mut Session, address: &str) -> String {
        client.select_client();
        client.set_field(FormField::Address, address);
        client.set_field(FormField::Description, "Boxes");
        client.set_field(FormField::Price, "1000");
        client.create_order().await.unwrap()
    }

    #[tokio::test]
    async fn test_full_order_lifecycle() {
        let system = start_system().await;
        let (mut alice, mut alice_inbox) = session("Alice", &system.order_client);
        let (mut bob, mut bob_inbox) = session("Bob", &system.order_client);

        let id = post_order(&mut alice, "Lenina 45").await;
        assert_eq!(alice.screen(), Screen::Client(ClientTab::Active));
        assert!(alice.form().is_empty());
        assert_eq!(drain(&mut alice_inbox), vec![Notification::success(format!("Order #{id} created"))]);

        let orders = alice.orders().await.unwrap();
        assert_eq!(filters::available_orders(&orders).len(), 1);
        assert_eq!(filters::client_active(&orders, "Alice").len(), 1);

        bob.select_courier();
        let accepted = bob.accept_order(&id).await.unwrap();
        assert_eq!(accepted.status, OrderStatus::Accepted);
        assert_eq!(accepted.courier_name.as_deref(), Some("Bob"));
        assert_eq!(accepted.status_label(), "Courier on the way");

        bob.start_work(&id).await.unwrap();
        let completed = bob.complete_order(&id).await.unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
        assert!(completed.completed_at.is_some());

        let orders = alice.orders().await.unwrap();
        assert!(filters::available_orders(&orders).is_empty());
        assert!(filters::courier_current(&orders, "Bob").is_empty());
        assert_eq!(filters::courier_history(&orders, "Bob").len(), 1);
        assert_eq!(filters::awaiting_rating(&orders, "Alice").len(), 1);

        let rated = alice.rate_order(&id, 5, "Great").await.unwrap();
        assert_eq!(rated.rating, Some(5));
        assert_eq!(rated.review.as_deref(), Some("Great"));

        let orders = alice.orders().await.unwrap();
        assert!(filters::awaiting_rating(&orders, "Alice").is_empty());
        assert_eq!(filters::reviewed_orders(&orders).len(), 1);

        let bob_messages = drain(&mut bob_inbox);
        assert_eq!(bob_messages.len(), 3);
        assert!(bob_messages.iter().all(|n| n.level == Level::Success));
        assert_eq!(
            bob_messages[2],
            Notification::success(format!("Order #{id} completed, earned 1000 RUB"))
        );

        bob.open_tab("stats");
        let stats = bob.render().await.unwrap();
        assert!(stats.contains("Earned:         1000 RUB"));
        assert!(stats.contains("Rating:         5.0"));

        alice.show_reviews();
        let reviews = alice.render().await.unwrap();
        assert!(reviews.contains("Alice -> Bob"));

        drop((alice, bob));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_incomplete_form_creates_nothing() {
        let system = start_system().await;
        let (mut alice, mut inbox) = session("Alice", &system.order_client);

        alice.select_client();
        alice.set_field(FormField::Address, "Lenina 45");
        alice.set_field(FormField::Price, "1000");

        let err = alice.create_order().await.unwrap_err();
        assert!(matches!(err, OrderError::ValidationError(_)));
        assert_eq!(alice.screen(), Screen::Client(ClientTab::Create));
        assert_eq!(alice.form().address, "Lenina 45");
        assert!(alice.orders().await.unwrap().is_empty());

        let messages = drain(&mut inbox);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, Level::Error);

        drop(alice);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_accepts_have_one_winner() {
        let system = start_system().await;
        let id = system
            .order_client
            .create_order(OrderCreate::new("Alice", "Lenina 45", "Boxes", 1000))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for n in 0..8 {
            let client = system.order_client.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                client.accept_order(id, format!("courier-{n}")).await
            }));
        }

        let mut winners = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(order) => winners.push(order.courier_name),
                Err(e) => assert_eq!(e, OrderError::AlreadyAccepted(id.clone())),
            }
        }
        assert_eq!(winners.len(), 1);

        let order = system.order_client.get_order(id).await.unwrap().unwrap();
        assert_eq!(order.courier_name, winners[0]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_refused_transitions_leave_orders_alone() {
        let system = start_system().await;
        let (mut alice, _alice_inbox) = session("Alice", &system.order_client);
        let (bob, mut bob_inbox) = session("Bob", &system.order_client);
        let (carol, _carol_inbox) = session("Carol", &system.order_client);

        let id = post_order(&mut alice, "Lenina 45").await;

        let err = bob.complete_order(&id).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { from: OrderStatus::Pending, .. }));
        assert_eq!(drain(&mut bob_inbox)[0].level, Level::Error);

        let err = alice.rate_order(&id, 5, "").await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));

        assert_eq!(
            bob.accept_order("no-such-order").await.unwrap_err(),
            OrderError::NotFound("no-such-order".into())
        );

        bob.accept_order(&id).await.unwrap();
        assert_eq!(carol.complete_order(&id).await.unwrap_err(), OrderError::NotAssigned(id.clone()));
        assert_eq!(carol.cancel_order(&id).await.unwrap_err(), OrderError::NotOwner(id.clone()));

        let order = system.order_client.get_order(id.clone()).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.courier_name.as_deref(), Some("Bob"));
        assert_eq!(order.rating, None);

        drop((alice, bob, carol));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_release_and_cancel() {
        let system = start_system().await;
        let (mut alice, _inbox) = session("Alice", &system.order_client);
        let (bob, _bob_inbox) = session("Bob", &system.order_client);

        let first = post_order(&mut alice, "Lenina 45").await;
        let second = post_order(&mut alice, "Pushkina 7").await;

        bob.accept_order(&first).await.unwrap();
        let released = bob.release_order(&first).await.unwrap();
        assert_eq!(released.status, OrderStatus::Pending);
        assert_eq!(released.courier_name, None);

        bob.accept_order(&second).await.unwrap();
        let cancelled = alice.cancel_order(&second).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let orders = alice.orders().await.unwrap();
        let available: Vec<_> = filters::available_orders(&orders).iter().map(|o| o.id.clone()).collect();
        assert_eq!(available, vec![first.clone()]);
        assert!(filters::courier_current(&orders, "Bob").is_empty());
        assert_eq!(filters::client_active(&orders, "Alice").len(), 1);
        assert!(filters::client_history(&orders, "Alice").is_empty());

        drop((alice, bob));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_sweep_only_expires_pending_orders() {
        let system = start_system().await;
        let orders = &system.order_client;
        let waiting = orders
            .create_order(OrderCreate::new("Alice", "Lenina 45", "Boxes", 1000))
            .await
            .unwrap();
        let taken = orders
            .create_order(OrderCreate::new("Alice", "Pushkina 7", "Sofa", 1500))
            .await
            .unwrap();
        orders.accept_order(taken.clone(), "Bob".into()).await.unwrap();

        assert_eq!(sweep_stale_orders(orders, Utc::now() - TimeDelta::hours(1)).await, 0);
        assert_eq!(sweep_stale_orders(orders, Utc::now() + TimeDelta::seconds(1)).await, 1);

        let waiting = orders.get_order(waiting).await.unwrap().unwrap();
        assert_eq!(waiting.status, OrderStatus::Cancelled);
        let taken = orders.get_order(taken).await.unwrap().unwrap();
        assert_eq!(taken.status, OrderStatus::Accepted);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_console_script() {
        let system = start_system().await;
        let (notifier, mut inbox) = ChannelNotifier::new();
        let mut session = Session::new("Alice", system.order_client.clone(), Arc::new(notifier));

        let script = [
            "client",
            "set address Lenina 45",
            "set description Boxes",
            "set price 1000",
            "create",
            "courier",
            "tab current",
        ];
        for line in script {
            let command: Command = line.parse().unwrap();
            assert_eq!(console::execute(&mut session, command).await, Step::Render);
        }
        assert_eq!(session.screen(), Screen::Courier(CourierTab::Current));
        assert_eq!(drain(&mut inbox).len(), 1);

        match console::execute(&mut session, Command::Dump).await {
            Step::Print(json) => {
                assert!(json.contains("\"address\": \"Lenina 45\""));
                assert!(json.contains("\"status\": \"pending\""));
            }
            other => panic!("Unexpected step: {other:?}"),
        }
        assert_eq!(console::execute(&mut session, Command::Quit).await, Step::Quit);

        drop(session);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_max_price_orders_still_render() {
        let system = start_system().await;
        let (mut alice, _alice_inbox) = session("Alice", &system.order_client);
        let (mut bob, _bob_inbox) = session("Bob", &system.order_client);
        let max_price = u64::MAX.to_string();

        for address in ["Lenina 45", "Pushkina 7"] {
            alice.select_client();
            alice.set_field(FormField::Address, address);
            alice.set_field(FormField::Description, "Boxes");
            alice.set_field(FormField::Price, max_price.as_str());
            let id = alice.create_order().await.unwrap();
            bob.accept_order(&id).await.unwrap();
            bob.complete_order(&id).await.unwrap();
        }

        alice.back();
        let menu = alice.render().await.unwrap();
        assert!(menu.contains("0 waiting for a courier, 0 in progress, 2 delivered"));

        bob.select_courier();
        bob.open_tab("stats");
        let stats = bob.render().await.unwrap();
        assert!(stats.contains(&format!("Earned:         {} RUB", 2 * u128::from(u64::MAX))));
        assert!(stats.contains(&format!("Average check:  {max_price} RUB")));

        drop((alice, bob));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_out_of_range_rating_from_console() {
        let system = start_system().await;
        let (mut alice, mut inbox) = session("Alice", &system.order_client);
        let (bob, _bob_inbox) = session("Bob", &system.order_client);

        let id = post_order(&mut alice, "Lenina 45").await;
        bob.accept_order(&id).await.unwrap();
        bob.complete_order(&id).await.unwrap();
        drain(&mut inbox);

        for rating in ["9", "300"] {
            let command: Command = format!("rate {id} {rating} Too much").parse().unwrap();
            assert_eq!(console::execute(&mut alice, command).await, Step::Render);
            assert_eq!(
                drain(&mut inbox),
                vec![Notification::error(format!(
                    "Order validation error: rating must be between 1 and 5, got {rating}"
                ))]
            );
        }

        let order = system.order_client.get_order(id).await.unwrap().unwrap();
        assert_eq!(order.rating, None);

        drop((alice, bob));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_create_goes_through_client() {
        let (inner, mut rx) = create_mock_client::<crate::domain::Order>(10);
        let (mut alice, mut inbox) = session("Alice", &OrderClient::new(inner));

        let task = tokio::spawn(async move {
            alice.set_field(FormField::Address, "Lenina 45");
            alice.set_field(FormField::Description, "Boxes");
            alice.set_field(FormField::Price, "1000");
            alice.create_order().await
        });

        let (payload, responder) = expect_create(&mut rx).await.expect("Expected Order Create");
        assert_eq!(payload.client_name, "Alice");
        assert_eq!(payload.price, 1000);
        responder.send(Ok("order_1".to_string())).unwrap();

        assert_eq!(task.await.unwrap(), Ok("order_1".to_string()));
        assert_eq!(drain(&mut inbox), vec![Notification::success("Order #order_1 created")]);
    }
}
