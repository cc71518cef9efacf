/// Fixed instruction sent ahead of every statement.
///
/// The example reply doubles as the schema: exactly the six wire codes, one
/// integer percentage each.
pub const SYSTEM_PROMPT: &str = "\
Du bewertest, wie gut eine Aussage zu den deutschen politischen Partein CDU, SPD, Grüne, FDP, Linke, und AfD passt. \
Gebe je eine Prozentzahl an, wie sehr die Parteien der gegebenen Aussage zustimmen. \
Gebe die Antwort in JSON. Gebe nichts weiteres aus.

Beispiel: {\"CDU\":50,\"SPD\":50,\"Grüne\":50,\"FDP\":50,\"Linke\":50,\"AfD\":50}
";

/// Bump when [`SYSTEM_PROMPT`] changes; logged with every request.
pub const PROMPT_VERSION: &str = "v1";
