//! User-facing text. The app ships in Japanese only.

pub const APP_TITLE: &str = "ミニチャット";
pub const APP_DESCRIPTION: &str =
    "バックエンドにメッセージや画像を送り、返答を表示する最小アプリです。";

pub const USER_LABEL: &str = "あなた";
pub const ASSISTANT_LABEL: &str = "アシスタント";

pub const EMPTY_TRANSCRIPT: &str =
    "ここに会話が表示されます。下のボックスからメッセージを送ってください。";
pub const SENDING: &str = "送信中...";
pub const SEND_BUTTON: &str = "送信";
pub const ANALYZE_BUTTON: &str = "画像を分析";
pub const TEXT_PLACEHOLDER: &str = "メッセージを入力して Enter で送信";
pub const IMAGE_PLACEHOLDER: &str = "画像への指示（省略可）";

pub const DROP_ZONE_HINT: &str = "画像をここにドラッグ＆ドロップ、またはクリックして選択";
pub const REMOVE_IMAGE: &str = "画像を削除";
pub const ENDPOINT_LABEL: &str = "API:";

/// Instruction sent with an image when the user typed none.
pub const DEFAULT_ANALYSIS_PROMPT: &str = "画像の内容を詳しく分析してください。";

/// Shown when an analysis body carries neither a result nor an error.
pub const EMPTY_ANALYSIS: &str = "解析結果が空でした。";

pub fn chat_error(detail: impl std::fmt::Display) -> String {
    format!("エラーが発生しました: {detail}")
}

pub fn image_error(detail: impl std::fmt::Display) -> String {
    format!("画像解析エラー: {detail}")
}

/// User-side transcript line for an analysis request.
pub fn analyzing(file_name: &str, instruction: Option<&str>) -> String {
    match instruction {
        Some(text) => format!("画像を分析中: {file_name}\n{text}"),
        None => format!("画像を分析中: {file_name}"),
    }
}
