/*!

This is the long-form manual for `legislator_votes` and `repvotes`.

## Input formats

The following formats are supported for the vote records:
* `csv` Comma Separated Values, long or wide
* `json` JSON, as an array of rows or as an object keyed by person
* `excel` Excel spreadsheets (.xlsx), long or wide

The format of the rows (long or wide) is detected automatically: if any row
has both a `bill` and a `vote` column, the dataset is long.

### Long format

One row per vote:

```text
person_id,name,district,bill,vote
ocd-person/1,Jane Doe,Grafton 12,"HB 1, 2025",Yea
ocd-person/1,Jane Doe,Grafton 12,SB 45,Nay
```

The identity of the person is read from the first non-empty column among
`id`, `person_id`, `openstates_person_id`, along with `name` and `district`.
Rows with neither an id nor a name are skipped.

The `bill` column is free text. When it contains a bill type (`HB`, `SB`,
`HR`, `SR`, `HJR`, `SJR`, `HCR`, `SCR`) followed by a number and optionally
by a year, the bill is named `HB1_2025`. Otherwise, the text is upper-cased
and every run of other characters becomes an underscore: `Budget vote` is
named `BUDGET_VOTE`, which is also its label.

### Wide format

One row per person, one column per bill:

```text
id,name,district,HB1_2025,HB2_2025
p1,Jane Doe,District 5,Yes,No
```

Every column other than `id`, `person_id`, `openstates_person_id`, `name`,
`district`, `party`, `bill` and `vote` is a bill. The header is used as the
name of the bill.

### JSON

Either an array of objects, each object being one row (long or wide), or an
object keyed by person:

```text
{ "p1": { "name": "Jane Doe", "HB1_2025": "Yes" },
  "p2": [ { "bill": "HB 1 2025", "vote": "No" } ] }
```

The key is used as the id of the rows that do not have one.

## Reading the votes

Each cell is classified, ignoring case and surrounding spaces:

| Decision     | Cells                                                                   |
|--------------|-------------------------------------------------------------------------|
| `FOR`        | `y`, `yes`, `aye`, `yea`, `for`, `supported`, `in favor`, `Pro-...`      |
| `AGAINST`    | `n`, `no`, `nay`, `against`, `opposed`, `Anti-...`                      |
| `DIDNT_VOTE` | `didn't vote`, `not voting`, `no vote`, `nv`, `excused`, `absent`, `present`, `abstain` |

The checks are made in this order. Any other cell, including an empty one,
counts as `DIDNT_VOTE` but the raw text is reported.

## Finding a representative

A representative is looked up by id, then by name, then by name and
district. Names and districts are compared in lowercase, without spaces or
punctuation. When the same name appears in several districts, the name alone
is not used: only the name and district can find the person.

## Issues

An issue is a list of bills, the most representative first. For each
representative, the first bill of the list present in their votes is used.
A polarity may be declared for a bill:

- `FOR_MEANS_SUPPORT`: voting for the bill supports the issue
- `AGAINST_MEANS_SUPPORT`: voting against the bill supports the issue

With a polarity, the decision reads `FOR` when the vote supports the issue
and `AGAINST` otherwise. A representative that did not vote stays at
`DIDNT_VOTE`.

## Configuration

`repvotes` accepts a configuration file in JSON:

```text
{
  "outputSettings": { "title": "Key votes 2025", "outputPath": "summary.json" },
  "voteSources": [ { "provider": "csv", "filePath": "votes.csv" } ],
  "representativesPath": "reps.json",
  "baseDistrict": "Grafton 012",
  "issues": [
    { "key": "privacy", "label": "Data privacy",
      "columns": ["HB1_2025", "HB2_2025"],
      "polarity": { "HB2_2025": "AGAINST_MEANS_SUPPORT" } }
  ]
}
```

The paths are relative to the configuration file. Options on the command
line take precedence over the configuration file.

Options for `voteSources`:
 - `provider` (string): one of `csv`, `json`, `excel`
 - `filePath` (string): the location of the file
 - `excelWorksheetName` (string, optional): for Excel files, the name of the
   worksheet. The first worksheet is used by default.

 */
