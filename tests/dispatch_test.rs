//! 通知分发流程测试
//!
//! 使用记录型发送器验证分发顺序、接收者过滤与文本处理行为

use std::sync::Mutex;

use async_trait::async_trait;
use telegram_notify::config::{Config, MessageFormat};
use telegram_notify::context::MessageContext;
use telegram_notify::dispatch::Dispatcher;
use telegram_notify::error::{SendError, TelegramNotifyError};
use telegram_notify::notification::sender::{NotificationSender, TextPayload};
use telegram_notify::resolve::Location;

/// 记录每次发送调用的测试发送器
#[derive(Default)]
struct RecordingSender {
    calls: Mutex<Vec<String>>,
    /// 第 N 次调用返回错误（从 1 计数），0 表示全部成功
    fail_at: usize,
}

impl RecordingSender {
    fn new() -> Self {
        Self::default()
    }

    fn failing_at(call: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: call,
        }
    }

    fn record(&self, entry: String) -> Result<(), SendError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(entry);

        if self.fail_at != 0 && calls.len() == self.fail_at {
            return Err(SendError::ApiError("模拟发送失败".to_string()));
        }

        Ok(())
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send_text(&self, chat_id: i64, payload: &TextPayload) -> Result<(), SendError> {
        self.record(format!("text:{}:{}:{}", chat_id, payload.format, payload.text))
    }

    async fn send_photo(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.record(format!("photo:{chat_id}:{path}"))
    }

    async fn send_document(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.record(format!("document:{chat_id}:{path}"))
    }

    async fn send_sticker(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.record(format!("sticker:{chat_id}:{path}"))
    }

    async fn send_audio(&self, chat_id: i64, path: &str, title: &str) -> Result<(), SendError> {
        self.record(format!("audio:{chat_id}:{path}:{title}"))
    }

    async fn send_voice(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.record(format!("voice:{chat_id}:{path}"))
    }

    async fn send_video(&self, chat_id: i64, path: &str, caption: &str) -> Result<(), SendError> {
        self.record(format!("video:{chat_id}:{path}:{caption}"))
    }

    async fn send_location(&self, chat_id: i64, location: &Location) -> Result<(), SendError> {
        self.record(format!(
            "location:{}:{}:{}",
            chat_id, location.latitude, location.longitude
        ))
    }

    async fn send_venue(&self, chat_id: i64, location: &Location) -> Result<(), SendError> {
        self.record(format!(
            "venue:{}:{}:{}:{}:{}",
            chat_id, location.latitude, location.longitude, location.title, location.address
        ))
    }
}

fn base_config() -> Config {
    Config {
        token: "123:abc".to_string(),
        to: vec!["2".to_string()],
        message: "hello".to_string(),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_single_recipient_single_message() {
    let sender = RecordingSender::new();
    let dispatcher = Dispatcher::new(base_config(), MessageContext::default());

    dispatcher.run_with(&sender).await.unwrap();

    assert_eq!(sender.calls(), vec!["text:2:markdown:hello".to_string()]);
}

#[tokio::test]
async fn test_recipient_order_and_category_order() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("a.png");
    std::fs::write(&photo, b"fake image").unwrap();

    let mut config = base_config();
    config.to = vec!["1".to_string(), "2".to_string()];
    config.photo = vec![photo.display().to_string()];
    config.location = vec!["35.661777,139.704051".to_string()];

    let sender = RecordingSender::new();
    let dispatcher = Dispatcher::new(config, MessageContext::default());
    dispatcher.run_with(&sender).await.unwrap();

    let photo_path = photo.display().to_string();
    assert_eq!(
        sender.calls(),
        vec![
            "text:1:markdown:hello".to_string(),
            format!("photo:1:{photo_path}"),
            "location:1:35.661777:139.704051".to_string(),
            "text:2:markdown:hello".to_string(),
            format!("photo:2:{photo_path}"),
            "location:2:35.661777:139.704051".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_match_email_filters_to_matched_recipients() {
    let specs = vec![
        "0".to_string(),
        "1:1@x.com".to_string(),
        "2:2@x.com".to_string(),
        "3:3@x.com".to_string(),
        "4".to_string(),
        "5".to_string(),
    ];

    let mut context = MessageContext::default();
    context.commit.email = "1@x.com".to_string();

    // match_email 开启且命中时只发送给命中的接收者
    let mut config = base_config();
    config.to = specs.clone();
    config.match_email = true;

    let sender = RecordingSender::new();
    Dispatcher::new(config, context.clone())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(sender.calls(), vec!["text:1:markdown:hello".to_string()]);

    // match_email 关闭时无条件接收者在前，命中者附加在后
    let mut config = base_config();
    config.to = specs;

    let sender = RecordingSender::new();
    Dispatcher::new(config, context).run_with(&sender).await.unwrap();

    assert_eq!(
        sender.calls(),
        vec![
            "text:0:markdown:hello".to_string(),
            "text:4:markdown:hello".to_string(),
            "text:5:markdown:hello".to_string(),
            "text:1:markdown:hello".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_first_send_failure_aborts_remaining() {
    let mut config = base_config();
    config.to = vec!["1".to_string(), "2".to_string(), "3".to_string()];

    let sender = RecordingSender::failing_at(2);
    let dispatcher = Dispatcher::new(config, MessageContext::default());

    let result = dispatcher.run_with(&sender).await;

    assert!(matches!(
        result,
        Err(TelegramNotifyError::Send(SendError::ApiError(_)))
    ));
    // 第二次调用失败后不再有后续发送
    assert_eq!(sender.calls().len(), 2);
}

#[tokio::test]
async fn test_markdown_escapes_message_and_context_fields() {
    let mut config = base_config();
    config.message = "build_upon {{commit.branch}}".to_string();

    let mut context = MessageContext::default();
    context.commit.branch = "feat_x".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, context).run_with(&sender).await.unwrap();

    assert_eq!(
        sender.calls(),
        vec!["text:2:markdown:build\\_upon feat\\_x".to_string()]
    );
}

#[tokio::test]
async fn test_html_format_skips_markdown_escaping() {
    let mut config = base_config();
    config.message = "a_b {{commit.branch}}".to_string();
    config.format = MessageFormat::Html;

    let mut context = MessageContext::default();
    context.commit.branch = "feat_x".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, context).run_with(&sender).await.unwrap();

    assert_eq!(sender.calls(), vec!["text:2:html:a_b feat_x".to_string()]);
}

#[tokio::test]
async fn test_html_entities_decoded_after_render() {
    let mut config = base_config();
    config.message = "a &gt; b &amp; c".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(sender.calls(), vec!["text:2:markdown:a > b & c".to_string()]);
}

#[tokio::test]
async fn test_default_message_content() {
    let mut config = base_config();
    config.message = String::new();
    config.format = MessageFormat::Html;

    let mut context = MessageContext::default();
    context.repo.full_name = "a/b".to_string();
    context.build.number = 101;
    context.build.status = "success".to_string();
    context.build.link = "L".to_string();
    context.commit.author = "A".to_string();
    context.commit.branch = "master".to_string();
    context.commit.message = "m".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, context).run_with(&sender).await.unwrap();

    // 默认消息强制使用 Markdown 格式
    assert_eq!(
        sender.calls(),
        vec![format!(
            "text:2:markdown:{}",
            "✅ Build #101 of `a/b` success.\n\n📝 Commit by A on `master`:\n``` m ```\n\n🌐 L"
        )]
    );
}

#[tokio::test]
async fn test_unreadable_message_file_aborts_before_any_send() {
    let mut config = base_config();
    config.message_file = "/nonexistent/message.txt".to_string();

    let sender = RecordingSender::new();
    let result = Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await;

    assert!(matches!(result, Err(TelegramNotifyError::Io { .. })));
    assert!(sender.calls().is_empty());
}

#[tokio::test]
async fn test_template_render_failure_aborts_before_send() {
    let mut config = base_config();
    config.message = "{{#if}}".to_string();

    let sender = RecordingSender::new();
    let result = Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await;

    assert!(matches!(result, Err(TelegramNotifyError::Template(_))));
    assert!(sender.calls().is_empty());
}

#[tokio::test]
async fn test_unresolvable_attachments_skipped_silently() {
    let mut config = base_config();
    config.photo = vec!["/nonexistent/a.png".to_string()];
    config.document = vec!["/nonexistent/*.pdf".to_string()];

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(sender.calls(), vec!["text:2:markdown:hello".to_string()]);
}

#[tokio::test]
async fn test_invalid_location_skipped_venue_sent() {
    let mut config = base_config();
    config.location = vec!["not-a-location".to_string()];
    config.venue = vec!["35.661777,139.704051,竹芝,東京都港区海岸1".to_string()];

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(
        sender.calls(),
        vec![
            "text:2:markdown:hello".to_string(),
            "venue:2:35.661777:139.704051:竹芝:東京都港区海岸1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_audio_title_and_video_caption() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("a.mp3");
    let video = dir.path().join("v.mp4");
    std::fs::write(&audio, b"fake audio").unwrap();
    std::fs::write(&video, b"fake video").unwrap();

    let mut config = base_config();
    config.audio = vec![audio.display().to_string()];
    config.video = vec![video.display().to_string()];

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(
        sender.calls(),
        vec![
            "text:2:markdown:hello".to_string(),
            format!("audio:2:{}:Audio Message.", audio.display()),
            format!("video:2:{}:Video Message", video.display()),
        ]
    );
}

#[tokio::test]
async fn test_template_vars_reach_rendered_message() {
    let mut config = base_config();
    config.message = "deploy {{tpl.env}}".to_string();
    config.template_vars = "{\"env\": \"production\"}".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert_eq!(
        sender.calls(),
        vec!["text:2:markdown:deploy production".to_string()]
    );
}

#[tokio::test]
async fn test_whitespace_only_message_sends_nothing() {
    let mut config = base_config();
    config.message = "   ".to_string();

    let sender = RecordingSender::new();
    Dispatcher::new(config, MessageContext::default())
        .run_with(&sender)
        .await
        .unwrap();

    assert!(sender.calls().is_empty());
}
