/*!
 * Translation of extracted documents via a remote chat-completion API.
 *
 * This module contains the translation half of the pipeline, split into
 * two submodules:
 *
 * - `client`: the stateless request/response wrapper around the remote API,
 *   behind the `Translator` trait so tests and callers can substitute
 *   their own backend
 * - `orchestrator`: the in-order walk over the structural model that turns
 *   a `Document` into its `TranslatedDocument` counterpart
 */

// Re-export main types for easier usage
pub use self::client::{ChatCompletionClient, Translator};
pub use self::orchestrator::DocumentTranslator;

// Submodules
pub mod client;
pub mod orchestrator;
