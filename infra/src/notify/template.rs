//! Message bodies for delivered codes

/// Renders the SMS and email bodies that carry a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    brand_name: String,
    ttl_minutes: u64,
}

impl MessageTemplate {
    pub fn new(brand_name: impl Into<String>, ttl_minutes: u64) -> Self {
        Self {
            brand_name: brand_name.into(),
            ttl_minutes: ttl_minutes.max(1),
        }
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    fn expiry_line(&self) -> String {
        let unit = if self.ttl_minutes == 1 { "minute" } else { "minutes" };
        format!("This code expires in {} {}.", self.ttl_minutes, unit)
    }

    pub fn sms_body(&self, code: &str) -> String {
        format!(
            "Your {} verification code is: {}\n\n{}\n\nDon't share this code with anyone.",
            self.brand_name,
            code,
            self.expiry_line()
        )
    }

    pub fn email_subject(&self) -> String {
        format!("Your {} Verification Code", self.brand_name)
    }

    pub fn email_text(&self, code: &str) -> String {
        format!(
            "Your verification code is: {}\n\n{}\nDon't share this code with anyone.\n\n\
             If you didn't request this code, you can safely ignore this email.\n\n{}",
            code,
            self.expiry_line(),
            self.brand_name
        )
    }

    pub fn email_html(&self, code: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
  <body style="margin:0;padding:0;background-color:#0A0A0A;font-family:Arial,Helvetica,sans-serif;">
    <table width="100%" cellpadding="0" cellspacing="0" style="padding:40px 20px;">
      <tr>
        <td align="center">
          <table width="100%" cellpadding="0" cellspacing="0" style="max-width:480px;background-color:#141414;border-radius:16px;padding:40px;">
            <tr>
              <td align="center" style="color:#00FF94;font-size:28px;font-weight:bold;padding-bottom:24px;">{brand}</td>
            </tr>
            <tr>
              <td align="center" style="color:#FFFFFF;font-size:16px;padding-bottom:16px;">Your verification code is:</td>
            </tr>
            <tr>
              <td align="center" style="color:#00FF94;font-size:36px;font-weight:bold;letter-spacing:8px;padding:16px 0;">{code}</td>
            </tr>
            <tr>
              <td align="center" style="color:#A0A0A0;font-size:14px;padding-top:16px;">{expiry}<br>Don't share this code with anyone.</td>
            </tr>
          </table>
          <p style="color:#666666;font-size:12px;padding-top:24px;">If you didn't request this code, you can safely ignore this email.</p>
        </td>
      </tr>
    </table>
  </body>
</html>"#,
            brand = self.brand_name,
            code = code,
            expiry = self.expiry_line()
        )
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self::new("YNOW", 5)
    }
}
