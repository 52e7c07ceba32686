//! OpenAI 提案ワーカー（TUIとは別スレッドで動く）
//!
//! UI スレッドは `SuggestionTicket` を送り、`SuggestionOutcome` を
//! 非ブロッキングで受け取る。チケットの有効性判定は UI 側の `Session` が行う。

use std::sync::mpsc::{Receiver, Sender};

use tokio::runtime::Runtime;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::error::SuggestionError;
use crate::lottery::SuggestionTicket;

use super::client::CompletionClient;
use super::requester::{request_suggestion, Suggestion};

/// ワーカーからの応答
#[derive(Debug, Clone)]
pub struct SuggestionOutcome {
    pub ticket_id: u64,
    pub result: Result<Suggestion, SuggestionError>,
}

/// 提案ワーカーを開始。送信側が drop されるとスレッドは終了する。
pub fn start_suggestion_worker<C>(
    client: C,
    rx_ticket: Receiver<SuggestionTicket>,
    tx_outcome: Sender<SuggestionOutcome>,
    config: Config,
) where
    C: CompletionClient + Send + 'static,
{
    std::thread::spawn(move || {
        // 専用スレッド内でTokioランタイムを構築
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!(target: "openai", "worker_runtime_error: {e}");
                // 応答しないと UI が処理中のまま固まるので、失敗として返し続ける
                while let Ok(ticket) = rx_ticket.recv() {
                    let result = Err(SuggestionError::Request(format!("async runtime unavailable: {e}")));
                    let _ = tx_outcome.send(SuggestionOutcome { ticket_id: ticket.id(), result });
                }
                return;
            }
        };
        rt.block_on(async move {
            while let Ok(ticket) = rx_ticket.recv() {
                let outcome = process_ticket(&client, &ticket, &config).await;
                info!(target: "openai", ticket_id = outcome.ticket_id, ok = outcome.result.is_ok(), "outcome_ready");
                if tx_outcome.send(outcome).is_err() {
                    break;
                }
            }
        });
        info!(target: "openai", "suggestion worker stopped");
    });
}

#[instrument(name = "process_ticket", skip_all, fields(ticket_id = ticket.id()))]
async fn process_ticket<C: CompletionClient>(
    client: &C,
    ticket: &SuggestionTicket,
    config: &Config,
) -> SuggestionOutcome {
    let result = request_suggestion(client, ticket.game(), Some(ticket.credential()), config).await;
    SuggestionOutcome { ticket_id: ticket.id(), result }
}
