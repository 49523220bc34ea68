//! チャネルごとのデモ用書き起こし

use crate::data::Channel;

const CALL_TRANSCRIPT: &str = "Customer: I'm calling about my bill, it seems higher than usual.
Agent: I can help with that. Can you provide your account number?
Customer: It's 12345. I just don't understand why it's so high this month.
Agent: I see your account. You have an additional data charge for exceeding your plan limit.
Customer: What? No one told me I was close to my limit! This is so frustrating.
Agent: The system sends automated alerts. You should have received a text message.
Customer: I never got anything. This is unfair billing practice.
Agent: I can see the alert was sent to 555-1234 on the 15th. Would you like to add a data pack to avoid future overages?";

const CHAT_TRANSCRIPT: &str = "Customer: Hi, my internet has been dropping frequently for the past week
Agent: Hello! I'm sorry to hear you're experiencing issues. Can you tell me more about what's happening?
Customer: It just randomly disconnects, especially during video calls. Very annoying.
Agent: I understand how frustrating that must be. Let's run a quick diagnostic on your connection.
Customer: OK, what do I need to do?
Agent: First, please restart your modem by unplugging it for 30 seconds and then plugging it back in.
Customer: I've done that already multiple times. It doesn't help.
Agent: I see. Let me check for any known outages in your area...";

const EMAIL_TRANSCRIPT: &str = "Subject: Refund Request

Dear Support Team,

I recently canceled my subscription but continue to be charged. I've sent two previous emails about this issue but haven't received a resolution. This is completely unacceptable and if not resolved immediately, I will be filing a complaint with the Better Business Bureau.

Please process my refund immediately and confirm when it has been completed.

Sincerely,
Frustrated Customer";

/// チャネルに対応するサンプル書き起こしを取得
pub fn sample_transcript(channel: Channel) -> &'static str {
    match channel {
        Channel::Call => CALL_TRANSCRIPT,
        Channel::Chat => CHAT_TRANSCRIPT,
        Channel::Email => EMAIL_TRANSCRIPT,
    }
}
