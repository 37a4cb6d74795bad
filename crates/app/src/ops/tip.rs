use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Tip {
    /// What the tip should be about
    #[arg(default_value = "file encryption")]
    pub topic: String,
}

#[async_trait::async_trait]
impl crate::op::Op for Tip {
    type Error = std::convert::Infallible;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        Ok(ctx.advice.tip(&self.topic).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{Op, OpContext};
    use common::advice::STATIC_TIPS;

    #[tokio::test]
    async fn test_tip_without_api_key_is_static() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = OpContext::new(Some(temp.path().join("sealbox"))).unwrap();

        let tip = Tip {
            topic: "file encryption".to_string(),
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert!(STATIC_TIPS.contains(&tip.as_str()));
    }
}
