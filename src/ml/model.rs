use burn::{
    nn::{
        attention::{MultiHeadAttention, MultiHeadAttentionConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

use crate::ml::positional::{LearnedPositionalEncoding, LearnedPositionalEncodingConfig};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct EncoderConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub dropout:     f64,
}

impl EncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NextTokenEncoder<B> {
        let token_embedding = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let positional = LearnedPositionalEncodingConfig::new(self.max_seq_len, self.d_model)
            .init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let lm_head    = LinearConfig::new(self.d_model, self.vocab_size).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        NextTokenEncoder {
            token_embedding, positional, layers,
            final_norm, lm_head, dropout,
            vocab_size: self.vocab_size,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1   = LayerNormConfig::new(self.d_model).init(device);
        let norm2   = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

/// One self-attention + feed-forward block with residual connections
/// and post-norm, as in the original transformer encoder.
#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        use burn::nn::attention::MhaInput;
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

/// The full sequence encoder: token embedding, learned positional
/// offsets, a stack of encoder blocks, and a projection to
/// vocabulary logits. Pure function of input and parameters,
/// modulo dropout randomness during training.
#[derive(Module, Debug)]
pub struct NextTokenEncoder<B: Backend> {
    pub token_embedding: Embedding<B>,
    pub positional:      LearnedPositionalEncoding<B>,
    pub layers:          Vec<EncoderBlock<B>>,
    pub final_norm:      LayerNorm<B>,
    pub lm_head:         Linear<B>,
    pub dropout:         Dropout,
    pub vocab_size:      usize,
}

impl<B: Backend> NextTokenEncoder<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, seq_len, vocab_size]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant, so position must be
        // injected explicitly. The table rejects sequences longer than
        // its capacity before anything else runs.
        let x = self.positional.forward(tok_emb);

        let mut x = self.dropout.forward(x);
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let x = self.final_norm.forward(x); // [batch, seq_len, d_model]

        self.lm_head.forward(x)
    }

    /// Next-token cross-entropy: logits flattened to [batch·seq_len,
    /// vocab_size] against targets flattened to [batch·seq_len].
    /// Returns the mean loss over every (batch, position) entry.
    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        targets:   Tensor<B, 2, Int>,
    ) -> Tensor<B, 1> {
        let logits = self.forward(input_ids);
        let [batch_size, seq_len, vocab_size] = logits.dims();

        let ce = burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device());
        ce.forward(
            logits.reshape([batch_size * seq_len, vocab_size]),
            targets.reshape([batch_size * seq_len]),
        )
    }
}
