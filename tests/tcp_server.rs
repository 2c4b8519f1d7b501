/// End-to-end test over real sockets: a telnet-style client joins, moves and chats.
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use towermud::engine::MudEngine;
use towermud::WorldData;

async fn read_until(reader: &mut BufReader<OwnedReadHalf>, needle: &str) -> Vec<String> {
    let mut seen = Vec::new();
    let result = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).await.unwrap() == 0 {
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']).to_string();
            let done = line.contains(needle);
            seen.push(line);
            if done {
                break;
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for {needle:?}, saw {seen:?}");
    seen
}

#[tokio::test]
async fn two_players_meet_over_tcp() {
    let world = WorldData::builtin().unwrap();
    let engine = MudEngine::new("127.0.0.1:0", &world)
        .await
        .unwrap()
        .with_tick(Duration::from_millis(10));
    let addr = engine.local_addr().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(engine.run_until(async {
        let _ = stop_rx.await;
    }));

    let (read, mut alice) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut alice_in = BufReader::new(read);
    read_until(&mut alice_in, "What is your name?").await;
    alice.write_all(b"alice\r\n").await.unwrap();
    read_until(&mut alice_in, "alice entered the game").await;

    let (read, mut bob) = TcpStream::connect(addr).await.unwrap().into_split();
    let mut bob_in = BufReader::new(read);
    read_until(&mut bob_in, "What is your name?").await;
    bob.write_all(b"bob\n").await.unwrap();
    read_until(&mut alice_in, "bob entered the game").await;

    bob.write_all(b"say hello alice\r\n").await.unwrap();
    read_until(&mut alice_in, "bob says: hello alice").await;

    alice.write_all(b"go outside\r\n").await.unwrap();
    read_until(&mut bob_in, "alice left via exit 'outside'").await;
    read_until(&mut alice_in, "You arrive at 'Corridor'").await;

    drop(alice);
    drop(alice_in);
    read_until(&mut bob_in, "alice has left the building").await;

    let _ = stop_tx.send(());
    server.await.unwrap().unwrap();
}
